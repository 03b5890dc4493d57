//! Route path templates
//!
//! A template is a `/`-separated list of segments. A segment is either
//! literal text or a single `<name>` placeholder that captures exactly one
//! request path segment.
//!
//! ```
//! use trellis_domain::value_objects::PathTemplate;
//!
//! let prefix = PathTemplate::parse("/api/v1/").unwrap();
//! let method = PathTemplate::parse("user/<user_id>").unwrap();
//! let full = PathTemplate::join(&prefix, &method);
//! assert_eq!(full.to_string(), "/api/v1/user/<user_id>");
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// One segment of a [`PathTemplate`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches the exact text
    Literal(String),
    /// Captures one segment under the given name
    Param(String),
}

/// Parsed route path template
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a raw template
    ///
    /// Leading, trailing and repeated slashes are ignored, so `"hello"`,
    /// `"/hello"` and `"hello/"` parse to the same template.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut segments = Vec::new();
        for part in raw.split('/').filter(|part| !part.is_empty()) {
            let segment = parse_segment(raw, part)?;
            if let Segment::Param(name) = &segment {
                let repeated = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                if repeated {
                    return Err(Error::discovery(format!(
                        "Path template '{raw}' repeats placeholder <{name}>"
                    )));
                }
            }
            segments.push(segment);
        }
        Ok(Self { segments })
    }

    /// Concatenate a controller prefix and a method path
    pub fn join(prefix: &PathTemplate, path: &PathTemplate) -> PathTemplate {
        let mut segments = prefix.segments.clone();
        segments.extend(path.segments.iter().cloned());
        PathTemplate { segments }
    }

    /// Template segments in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names with their segment index
    pub fn params(&self) -> impl Iterator<Item = (usize, &str)> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(index, segment)| match segment {
                Segment::Param(name) => Some((index, name.as_str())),
                Segment::Literal(_) => None,
            })
    }

    /// Number of literal segments
    pub fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Literal(_)))
            .count()
    }

    /// Whether the template declares the named placeholder
    pub fn has_param(&self, name: &str) -> bool {
        self.params().any(|(_, param)| param == name)
    }

    /// Rendering with placeholder names erased
    ///
    /// Two templates with the same key match exactly the same request paths.
    pub fn conflict_key(&self) -> String {
        self.render(true)
    }

    /// Match a concrete request path, returning the captured segments
    pub fn match_path(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut captured = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(text) if text == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    captured.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(captured)
    }

    fn render(&self, erase_names: bool) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(_) if erase_names => out.push_str("<>"),
                Segment::Param(name) => {
                    out.push('<');
                    out.push_str(name);
                    out.push('>');
                }
            }
        }
        out
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

fn parse_segment(raw: &str, part: &str) -> Result<Segment> {
    if let Some(inner) = part.strip_prefix('<') {
        let name = inner.strip_suffix('>').ok_or_else(|| {
            Error::discovery(format!("Path template '{raw}' has unterminated placeholder '{part}'"))
        })?;
        if !is_identifier(name) {
            return Err(Error::discovery(format!(
                "Path template '{raw}' has invalid placeholder '{part}'"
            )));
        }
        return Ok(Segment::Param(name.to_string()));
    }
    if !part.chars().all(is_literal_char) {
        return Err(Error::discovery(format!(
            "Path template '{raw}' has invalid segment '{part}'"
        )));
    }
    Ok(Segment::Literal(part.to_string()))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_literal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@".contains(c)
}
