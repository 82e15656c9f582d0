//! Minimal XML handling for spreadsheet package parts.
//!
//! Two pieces: [`decode_entities`] for text content and [`TagScanner`], a
//! forward-only tag tokenizer with an explicit cursor. The scanner never
//! backtracks, so every part is processed in a single linear pass no matter
//! how it is shaped. Namespaces, DTDs and CDATA are not interpreted; comments,
//! processing instructions and declarations are skipped.

use std::borrow::Cow;

const NAMED_ENTITIES: [(&str, char); 5] = [
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&amp;", '&'),
    ("&quot;", '"'),
    ("&apos;", '\''),
];

/// Decode the predefined XML entities and numeric character references.
///
/// Decoding is a single left-to-right pass, so `&amp;lt;` becomes `&lt;`
/// and not `<`. A numeric reference whose value is not a valid character
/// decodes to `'\0'`. Anything else starting with `&` is kept verbatim.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_reference(tail) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode one reference at the start of `s` (which begins with `&`).
///
/// Returns the character and the number of bytes consumed.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    for (entity, ch) in NAMED_ENTITIES {
        if s.starts_with(entity) {
            return Some((ch, entity.len()));
        }
    }

    let body = s.strip_prefix("&#")?;
    let (digits, radix, prefix_len) = match body.strip_prefix('x') {
        Some(hex) => (hex, 16, 3),
        None => (body, 10, 2),
    };
    let len = digits
        .bytes()
        .take_while(|b| match radix {
            16 => b.is_ascii_hexdigit(),
            _ => b.is_ascii_digit(),
        })
        .count();
    if len == 0 || digits.as_bytes().get(len) != Some(&b';') {
        return None;
    }

    let ch = u32::from_str_radix(&digits[..len], radix)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or('\0');
    Some((ch, prefix_len + len + 1))
}

/// Strip a leading UTF-8 byte order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Start,
    /// `</name>`
    End,
    /// `<name .../>`
    Empty,
}

/// A single tag as seen by the scanner.
#[derive(Debug, Clone, Copy)]
pub struct Tag<'a> {
    /// Local name, namespace prefix removed.
    pub name: &'a str,
    pub kind: TagKind,
    attrs: &'a str,
}

impl<'a> Tag<'a> {
    /// Raw (undecoded) value of the attribute with this exact qualified name.
    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.attributes().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn attributes(&self) -> Attributes<'a> {
        Attributes { rest: self.attrs }
    }

    pub fn is_start(&self, name: &str) -> bool {
        self.kind == TagKind::Start && self.name == name
    }

    pub fn is_end(&self, name: &str) -> bool {
        self.kind == TagKind::End && self.name == name
    }

    /// Start or self-closing tag with this local name.
    pub fn opens(&self, name: &str) -> bool {
        self.kind != TagKind::End && self.name == name
    }
}

/// Iterator over `name="value"` pairs of a tag.
///
/// Stops at the first attribute it cannot make sense of.
pub struct Attributes<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.trim_start();
        let name_end = rest.find(|c: char| c == '=' || c.is_whitespace())?;
        let name = &rest[..name_end];

        let after = rest[name_end..].trim_start().strip_prefix('=')?.trim_start();
        let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let value_part = &after[1..];
        let close = value_part.find(quote)?;

        self.rest = &value_part[close + 1..];
        Some((name, &value_part[..close]))
    }
}

/// Forward-only tag tokenizer over a borrowed XML document.
pub struct TagScanner<'a> {
    xml: &'a str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    pub fn new(xml: &'a str) -> Self {
        Self {
            xml: strip_bom(xml),
            pos: 0,
        }
    }

    /// Raw text following the last returned start tag, up to and including
    /// the matching `</name>`.
    ///
    /// Only the text before the first nested tag is returned; nested
    /// elements are skipped. If the closing tag never appears the rest of
    /// the document is consumed.
    pub fn read_text(&mut self, name: &str) -> &'a str {
        let xml = self.xml;
        let rest = &xml[self.pos..];
        let text = match rest.find('<') {
            Some(lt) => &rest[..lt],
            None => rest,
        };

        let mut depth = 0usize;
        while let Some(tag) = self.next() {
            match tag.kind {
                TagKind::Start if tag.name == name => depth += 1,
                TagKind::End if tag.name == name => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        text
    }

    /// Move the cursor past the first `terminator` at or after `lt`, or to
    /// the end of the document.
    fn skip_past(&mut self, lt: usize, terminator: &str) {
        self.pos = match self.xml[lt..].find(terminator) {
            Some(i) => lt + i + terminator.len(),
            None => self.xml.len(),
        };
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        let xml = self.xml;
        loop {
            let lt = self.pos + xml[self.pos..].find('<')?;
            let rest = &xml[lt..];

            if rest.starts_with("<!--") {
                self.skip_past(lt, "-->");
                continue;
            }
            if rest.starts_with("<![CDATA[") {
                self.skip_past(lt, "]]>");
                continue;
            }
            if rest.starts_with("<?") {
                self.skip_past(lt, "?>");
                continue;
            }
            if rest.starts_with("<!") {
                self.skip_past(lt, ">");
                continue;
            }

            // '>' may legally appear inside quoted attribute values
            let mut quote = None;
            let gt = rest.bytes().enumerate().skip(1).find_map(|(i, b)| {
                match (quote, b) {
                    (None, b'"' | b'\'') => quote = Some(b),
                    (Some(q), _) if q == b => quote = None,
                    (None, b'>') => return Some(i),
                    _ => {}
                }
                None
            });
            let Some(gt) = gt else {
                self.pos = xml.len();
                return None;
            };
            self.pos = lt + gt + 1;

            let mut inner = &rest[1..gt];
            let kind = if let Some(stripped) = inner.strip_prefix('/') {
                inner = stripped;
                TagKind::End
            } else if let Some(stripped) = inner.strip_suffix('/') {
                inner = stripped;
                TagKind::Empty
            } else {
                TagKind::Start
            };

            let name_end = inner
                .find(|c: char| c.is_whitespace())
                .unwrap_or(inner.len());
            let qname = &inner[..name_end];
            let name = qname.rsplit(':').next().unwrap_or(qname);

            return Some(Tag {
                name,
                kind,
                attrs: &inner[name_end..],
            });
        }
    }
}
