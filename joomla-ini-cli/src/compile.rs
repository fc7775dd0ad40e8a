use joomla_ini::{
    CompileOptions, Error, Substitutions, Untranslated, compile, compile_file, read_to_string,
};

pub fn run_compile(
    template: &str,
    substitutions: &str,
    output: Option<&str>,
    fail_untranslated: bool,
    lenient: bool,
) -> Result<(), Error> {
    let substitutions = Substitutions::from_json(&read_to_string(substitutions)?)?;
    let untranslated = if fail_untranslated {
        Untranslated::Fail
    } else {
        Untranslated::Blank
    };
    let options = CompileOptions::new()
        .with_untranslated(untranslated)
        .with_strict(!lenient);

    match output {
        Some(path) => compile_file(template, &substitutions, &options, path),
        None => {
            let compiled = compile(&read_to_string(template)?, &substitutions, &options)?;
            print!("{}", compiled);
            Ok(())
        }
    }
}
