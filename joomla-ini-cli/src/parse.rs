use joomla_ini::{Dialect, Error, ParseOptions, ParsedFile, parse_file, read_to_string};

fn parse_source_file(path: &str) -> Result<ParsedFile, Error> {
    parse_file(path, &ParseOptions::source(), &|_: &str, _: &str| true)
}

pub fn run_detect(input: &str) -> Result<(), Error> {
    let content = read_to_string(input)?;
    println!("{}", Dialect::detect(&content));
    Ok(())
}

pub fn run_parse(input: &str, source_file: Option<&str>, resource: &str) -> Result<(), Error> {
    let parsed = match source_file {
        Some(source_file) => {
            let source = parse_source_file(source_file)?;
            parse_file(input, &ParseOptions::translation(resource), &source)?
        }
        None => parse_source_file(input)?,
    };

    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

pub fn run_skeleton(input: &str, output: Option<&str>) -> Result<(), Error> {
    let parsed = parse_source_file(input)?;
    let skeleton = parsed.skeleton.unwrap_or_default();
    match output {
        Some(path) => std::fs::write(path, skeleton)?,
        None => print!("{}", skeleton),
    }
    Ok(())
}
