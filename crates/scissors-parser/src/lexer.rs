//! Token-level parsers for XML markup.

use std::borrow::Cow;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, satisfy},
    combinator::recognize,
    error::{Error as NomError, ErrorKind},
    sequence::{delimited, pair, terminated},
    IResult,
};
use thiserror::Error;

/// XML whitespace: space, tab, line feed and carriage return.
pub fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_alphanumeric() || matches!(c, '-' | '.' | '\u{B7}')
}

/// Parse optional whitespace.
pub fn space0(input: &str) -> IResult<&str, &str> {
    take_while(is_xml_space)(input)
}

/// Split leading whitespace off `input`, returning `(rest, whitespace)`.
pub fn split_space(input: &str) -> (&str, &str) {
    let rest = input.trim_start_matches(is_xml_space);
    (rest, &input[..input.len() - rest.len()])
}

/// Parse an XML name (tag or attribute name, PI target).
pub fn name(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_name_start), take_while(is_name_char)))(input)
}

/// Parse a single- or double-quoted literal, returning the raw contents.
pub fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
    ))(input)
}

/// Parse `name = "value"`, returning the name and the raw value.
pub fn attribute(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, key) = name(input)?;
    let (input, _) = delimited(space0, char('='), space0)(input)?;
    let (input, value) = quoted(input)?;
    Ok((input, (key, value)))
}

/// Parse `<!-- ... -->`, returning the comment body.
pub fn comment(input: &str) -> IResult<&str, &str> {
    delimited(tag("<!--"), take_until("-->"), tag("-->"))(input)
}

/// Parse `<![CDATA[ ... ]]>`, returning the section body.
pub fn cdata(input: &str) -> IResult<&str, &str> {
    delimited(tag("<![CDATA["), take_until("]]>"), tag("]]>"))(input)
}

/// Parse `<?target data?>`, returning the target and the data.
pub fn processing_instruction(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = tag("<?")(input)?;
    let (input, target) = name(input)?;
    let (input, data) = terminated(take_until("?>"), tag("?>"))(input)?;
    Ok((input, (target, data.trim_matches(is_xml_space))))
}

/// Parse a `<!DOCTYPE ...>` declaration, including an internal subset.
pub fn doctype(input: &str) -> IResult<&str, &str> {
    let (rest, _) = tag("<!DOCTYPE")(input)?;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in rest.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, '>') if depth == 0 => return Ok((&rest[i + 1..], &rest[..i])),
            _ => {}
        }
    }
    Err(nom::Err::Error(NomError::new(input, ErrorKind::TakeUntil)))
}

/// Parse character data up to the next markup.
pub fn char_data(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != '<')(input)
}

/// Parse `&name;`, returning `name`.
fn reference(input: &str) -> IResult<&str, &str> {
    delimited(
        char('&'),
        take_while1(|c: char| c != ';' && c != '&' && c != '<' && !is_xml_space(c)),
        char(';'),
    )(input)
}

/// Failure while expanding references; offsets are byte offsets into the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("unknown entity &{name};")]
    Unknown { name: String, offset: usize },

    #[error("invalid character reference &{reference};")]
    InvalidReference { reference: String, offset: usize },

    #[error("unterminated entity reference")]
    Unterminated { offset: usize },
}

/// Expand predefined entities and numeric character references.
pub fn decode_entities(raw: &str) -> Result<Cow<'_, str>, EntityError> {
    if !raw.contains('&') {
        return Ok(Cow::Borrowed(raw));
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let offset = raw.len() - rest.len() + amp;
        let (after, body) =
            reference(&rest[amp..]).map_err(|_| EntityError::Unterminated { offset })?;
        out.push(expand_reference(body, offset)?);
        rest = after;
    }
    out.push_str(rest);
    Ok(Cow::Owned(out))
}

fn expand_reference(body: &str, offset: usize) -> Result<char, EntityError> {
    match body {
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "amp" => Ok('&'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        _ => {
            let Some(number) = body.strip_prefix('#') else {
                return Err(EntityError::Unknown {
                    name: body.to_string(),
                    offset,
                });
            };
            let code = match number.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => number.parse::<u32>().ok(),
            };
            code.and_then(char::from_u32).ok_or_else(|| EntityError::InvalidReference {
                reference: body.to_string(),
                offset,
            })
        }
    }
}

/// Attribute-value normalization: literal tabs and newlines become spaces.
pub fn normalize_attribute_value(raw: &str) -> Cow<'_, str> {
    if raw.contains(['\t', '\n', '\r']) {
        Cow::Owned(raw.replace(['\t', '\n', '\r'], " "))
    } else {
        Cow::Borrowed(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert_eq!(name("svg:rect x"), Ok((" x", "svg:rect")));
        assert_eq!(name("a-b.c_1>"), Ok((">", "a-b.c_1")));
        assert!(name("1abc").is_err());
    }

    #[test]
    fn test_attribute_quotes() {
        assert_eq!(attribute("x = \"1\"/>"), Ok(("/>", ("x", "1"))));
        assert_eq!(attribute("y='a\"b'>"), Ok((">", ("y", "a\"b"))));
        assert!(attribute("z=1").is_err());
    }

    #[test]
    fn test_comment_and_cdata() {
        assert_eq!(comment("<!-- hi -->rest"), Ok(("rest", " hi ")));
        assert_eq!(cdata("<![CDATA[a<b]]>"), Ok(("", "a<b")));
        assert!(comment("<!-- never closed").is_err());
    }

    #[test]
    fn test_processing_instruction() {
        assert_eq!(
            processing_instruction("<?xml version=\"1.0\"?>\n"),
            Ok(("\n", ("xml", "version=\"1.0\"")))
        );
    }

    #[test]
    fn test_doctype_with_internal_subset() {
        let input = "<!DOCTYPE a [ <!ENTITY e \"x>y\"> ]><a/>";
        let (rest, _) = doctype(input).unwrap();
        assert_eq!(rest, "<a/>");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("plain").unwrap(), "plain");
        assert_eq!(
            decode_entities("a &lt;b&gt; &amp; &#65;&#x42;").unwrap(),
            "a <b> & AB"
        );
    }

    #[test]
    fn test_decode_entities_errors() {
        assert_eq!(
            decode_entities("x &nbsp; y"),
            Err(EntityError::Unknown {
                name: "nbsp".into(),
                offset: 2
            })
        );
        assert_eq!(
            decode_entities("&#xD800;"),
            Err(EntityError::InvalidReference {
                reference: "#xD800".into(),
                offset: 0
            })
        );
        assert_eq!(
            decode_entities("fish & chips"),
            Err(EntityError::Unterminated { offset: 5 })
        );
    }

    #[test]
    fn test_normalize_attribute_value() {
        assert_eq!(normalize_attribute_value("a\tb\nc"), "a b c");
        assert!(matches!(normalize_attribute_value("abc"), Cow::Borrowed(_)));
    }
}
