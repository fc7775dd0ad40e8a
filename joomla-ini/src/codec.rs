//! File-level helpers around the parser and compiler.
//!
//! The codec itself works on in-memory strings. These helpers read files
//! from disk (sniffing a UTF-8 or UTF-16 byte order mark), feed them to
//! [`crate::parser::parse`] or [`crate::compiler::compile`], and write the
//! results back.

use std::{borrow::Cow, fs, path::Path};

use encoding_rs::{Encoding, UTF_8};

use crate::{
    compiler::{Substitutions, compile},
    error::Error,
    options::{CompileOptions, ParseOptions},
    parser::{ParsedFile, parse},
    traits::SourceLookup,
};

/// Decodes raw file bytes into text.
///
/// A byte order mark selects the encoding and is stripped; without one the
/// bytes must be valid UTF-8. Malformed input is a [`Error::Parse`].
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, Error> {
    let (encoding, bom_length) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    let body = &bytes[bom_length..];

    if encoding == UTF_8 {
        return Ok(Cow::Borrowed(std::str::from_utf8(body)?));
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| {
            Error::parse_error(format!("content is not valid {}", encoding.name()), None)
        })
}

/// Reads and decodes a whole file.
pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let path = path.as_ref();
    tracing::debug!("reading {:?}", path);
    let bytes = fs::read(path)?;
    Ok(decode(&bytes)?.into_owned())
}

/// Reads and parses a file.
pub fn parse_file<P, L>(path: P, options: &ParseOptions, lookup: &L) -> Result<ParsedFile, Error>
where
    P: AsRef<Path>,
    L: SourceLookup + ?Sized,
{
    let content = read_to_string(path)?;
    parse(&content, options, lookup)
}

/// Compiles the template at `template_path` and writes the result to
/// `output_path`. Output is always UTF-8 without a byte order mark.
pub fn compile_file<P, Q>(
    template_path: P,
    substitutions: &Substitutions,
    options: &CompileOptions,
    output_path: Q,
) -> Result<(), Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let template = read_to_string(template_path)?;
    let compiled = compile(&template, substitutions, options)?;
    fs::write(output_path, compiled).map_err(Error::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use tempfile::TempDir;

    #[test]
    fn test_decode_plain_utf8() {
        assert_eq!(decode("FOO=Café".as_bytes()).unwrap(), "FOO=Café");
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        assert_eq!(decode(b"\xef\xbb\xbf;x").unwrap(), ";x");
    }

    #[test]
    fn test_decode_utf16le() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in ";A=\"b\"".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode(&bytes).unwrap(), ";A=\"b\"");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert!(decode(b"\xc3\x28").unwrap_err().is_parse());
    }

    #[test]
    fn test_parse_and_compile_files() {
        let temp_dir = TempDir::new().unwrap();
        let source_path = temp_dir.path().join("en-GB.com_demo.ini");
        let output_path = temp_dir.path().join("fr-FR.com_demo.ini");
        fs::write(&source_path, "; demo\nHELLO=\"Hello\"\n").unwrap();

        let parsed = parse_file(&source_path, &ParseOptions::source(), &|_: &str, _: &str| true)
            .unwrap();
        assert_eq!(parsed.dialect, Dialect::Modern);

        let skeleton_path = temp_dir.path().join("skeleton.ini");
        fs::write(&skeleton_path, parsed.skeleton.unwrap()).unwrap();

        let mut substitutions = Substitutions::new();
        substitutions.insert_key("HELLO", "Bonjour");
        compile_file(
            &skeleton_path,
            &substitutions,
            &CompileOptions::default(),
            &output_path,
        )
        .unwrap();
        assert_eq!(
            fs::read_to_string(&output_path).unwrap(),
            "; demo\nHELLO=\"Bonjour\"\n"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_to_string("/definitely/not/here.ini").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
