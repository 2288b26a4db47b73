//! Serializer adapter: renders the mutated tree back to markup

use htmlentity::entity::{CharacterSet, EncodeType, ICodedDataTrait, encode};
use kuchiki::NodeRef;

use super::types::InlineSvgResult;

/// Serialize `document` to HTML text
///
/// With `decode_entities` off, characters are written literally and only the
/// mandatory escapes are applied. With it on, every non-ASCII character is
/// additionally written as a character reference (named when one exists).
///
/// # Errors
///
/// Returns [`super::InlineSvgError::Serialize`] if the serializer fails.
pub fn serialize_document(document: &NodeRef, decode_entities: bool) -> InlineSvgResult<String> {
    let mut html_output = Vec::new();
    document.serialize(&mut html_output)?;

    let html = String::from_utf8(html_output)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    if !decode_entities {
        return Ok(html);
    }

    encode(html.as_bytes(), &EncodeType::NamedOrHex, &CharacterSet::NonASCII)
        .to_string()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()).into())
}
