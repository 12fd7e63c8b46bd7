use crate::error::{CodecError, CodecResult};
use crate::object::TaggedObject;
use crate::tag::Tag;

fn is_ws(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n'
}

fn skip_ws(s: &str) -> &str {
    s.trim_start_matches(is_ws)
}

fn excerpt(s: &str) -> String {
    let truncated: String = s.chars().take(32).collect();
    truncated
}

/// Parse one object from the front of `input`, returning it and whatever is
/// left unconsumed. Each alternative either succeeds consuming a prefix or
/// fails without consuming (spec §4.4).
pub fn parse_object(input: &str) -> CodecResult<(TaggedObject, &str)> {
    let input = skip_ws(input);

    if let Some(rest) = input.strip_prefix("null") {
        return Ok((TaggedObject::Void, rest));
    }
    if let Some(rest) = input.strip_prefix("true") {
        return Ok((TaggedObject::True, rest));
    }
    if let Some(rest) = input.strip_prefix("false") {
        return Ok((TaggedObject::False, rest));
    }
    if input.starts_with('"') {
        return parse_quoted(input);
    }
    if input.starts_with('[') {
        return parse_list(input);
    }
    if input.starts_with('{') {
        return parse_dict(input);
    }
    if input.starts_with('-') || input.starts_with(|c: char| c.is_ascii_digit()) {
        return parse_number(input);
    }

    Err(CodecError::ParseError { at: excerpt(input) })
}

fn parse_number(input: &str) -> CodecResult<(TaggedObject, &str)> {
    let mut chars = input.char_indices().peekable();

    if let Some((_, '-')) = chars.peek().copied() {
        chars.next();
    }
    match chars.peek().copied() {
        Some((_, c)) if c.is_ascii_digit() => {}
        _ => return Err(CodecError::ParseError { at: excerpt(input) }),
    };

    let mut last_digit_end = None;
    while let Some((i, c)) = chars.peek().copied() {
        if c.is_ascii_digit() {
            last_digit_end = Some(i + c.len_utf8());
            chars.next();
        } else {
            break;
        }
    }
    let end = match last_digit_end {
        Some(e) => e,
        None => return Err(CodecError::ParseError { at: excerpt(input) }),
    };

    let int_part = &input[..end];
    let rest = &input[end..];

    if let Some(after_dot) = rest.strip_prefix('.') {
        let mut frac_chars = after_dot.char_indices().peekable();
        let mut frac_end = 0usize;
        while let Some((i, c)) = frac_chars.peek().copied() {
            if c.is_ascii_digit() {
                frac_end = i + c.len_utf8();
                frac_chars.next();
            } else {
                break;
            }
        }
        if frac_end == 0 {
            return Err(CodecError::ParseError { at: excerpt(input) });
        }
        let literal = &after_dot[..frac_end];
        let full = format!("{}.{}", int_part, literal);
        let after_frac = &after_dot[frac_end..];

        if let Some(tail) = after_frac.strip_prefix('f') {
            let value: f32 = full.parse().map_err(|_| CodecError::ParseError {
                at: excerpt(input),
            })?;
            return Ok((TaggedObject::Float(value), tail));
        }
        if let Some(tail) = after_frac.strip_prefix('d') {
            let value: f64 = full.parse().map_err(|_| CodecError::ParseError {
                at: excerpt(input),
            })?;
            return Ok((TaggedObject::Double(value), tail));
        }
        return Err(CodecError::ParseError { at: excerpt(input) });
    }

    if let Some(after_i) = rest.strip_prefix('i') {
        let mut width_chars = after_i.char_indices().peekable();
        let mut width_end = 0usize;
        while let Some((i, c)) = width_chars.peek().copied() {
            if c.is_ascii_digit() {
                width_end = i + c.len_utf8();
                width_chars.next();
            } else {
                break;
            }
        }
        if width_end == 0 {
            return Err(CodecError::ParseError { at: excerpt(input) });
        }
        let width_literal = &after_i[..width_end];
        let tail = &after_i[width_end..];
        let value: i128 = int_part.parse().map_err(|_| CodecError::ParseError {
            at: excerpt(input),
        })?;

        return match width_literal {
            "8" => in_range(value, i8::MIN as i128, i8::MAX as i128)
                .map(|v| (TaggedObject::Int8(v as i8), tail)),
            "16" => in_range(value, i16::MIN as i128, i16::MAX as i128)
                .map(|v| (TaggedObject::Int16(v as i16), tail)),
            "32" => in_range(value, i32::MIN as i128, i32::MAX as i128)
                .map(|v| (TaggedObject::Int32(v as i32), tail)),
            "64" => in_range(value, i64::MIN as i128, i64::MAX as i128)
                .map(|v| (TaggedObject::Int64(v as i64), tail)),
            _ => Err(CodecError::ParseError { at: excerpt(input) }),
        };
    }

    Err(CodecError::ParseError { at: excerpt(input) })
}

fn in_range(value: i128, min: i128, max: i128) -> CodecResult<i128> {
    if value < min || value > max {
        Err(CodecError::TooWide { value })
    } else {
        Ok(value)
    }
}

fn parse_quoted(input: &str) -> CodecResult<(TaggedObject, &str)> {
    debug_assert!(input.starts_with('"'));
    let after_open = &input[1..];
    let close = after_open.find('"').ok_or(CodecError::ParseError {
        at: excerpt(input),
    })?;
    let content = &after_open[..close];
    let rest = &after_open[close + 1..];

    let next_is_alnum_after = |s: &str, n: usize| {
        s[n..].chars().next().map(|c| c.is_alphanumeric()).unwrap_or(false)
    };

    if rest.starts_with('b') && !next_is_alnum_after(rest, 1) {
        let bytes = decode_hex(content)?;
        return Ok((TaggedObject::Binary(bytes), &rest[1..]));
    }
    if let Some(tail) = rest.strip_prefix("utf16") {
        return Ok((TaggedObject::Utf16(content.to_string()), tail));
    }
    if let Some(tail) = rest.strip_prefix("utf32") {
        return Ok((TaggedObject::Utf32(content.to_string()), tail));
    }
    if let Some(tail) = rest.strip_prefix("utf8") {
        return Ok((TaggedObject::Utf8(content.to_string()), tail));
    }

    Err(CodecError::ParseError { at: excerpt(input) })
}

fn decode_hex(content: &str) -> CodecResult<Vec<u8>> {
    if content.len() % 2 != 0 {
        return Err(CodecError::BadLength {
            detail: "hex literal has odd length".into(),
        });
    }
    let bytes = content.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 2);
    for pair in bytes.chunks_exact(2) {
        let hi = hex_nibble(pair[0]).ok_or(CodecError::ParseError {
            at: content.to_string(),
        })?;
        let lo = hex_nibble(pair[1]).ok_or(CodecError::ParseError {
            at: content.to_string(),
        })?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

fn parse_list(input: &str) -> CodecResult<(TaggedObject, &str)> {
    debug_assert!(input.starts_with('['));
    let mut rest = skip_ws(&input[1..]);

    if let Some(tail) = rest.strip_prefix(']') {
        return Ok((TaggedObject::empty_list(), tail));
    }

    let mut items = Vec::new();
    loop {
        let (item, after_item) = parse_object(rest)?;
        items.push(item);
        rest = skip_ws(after_item);

        if let Some(tail) = rest.strip_prefix(']') {
            rest = tail;
            break;
        }
        if let Some(tail) = rest.strip_prefix(',') {
            rest = skip_ws(tail);
            if rest.starts_with(']') {
                return Err(CodecError::TrailingComma { at: excerpt(rest) });
            }
            continue;
        }
        return Err(CodecError::ParseError { at: excerpt(rest) });
    }

    let item_tag = items.first().map(|o| o.tag()).unwrap_or(Tag::Void);
    Ok((TaggedObject::List { item_tag, items }, rest))
}

fn parse_dict(input: &str) -> CodecResult<(TaggedObject, &str)> {
    debug_assert!(input.starts_with('{'));
    let mut rest = skip_ws(&input[1..]);

    if let Some(tail) = rest.strip_prefix('}') {
        return Ok((TaggedObject::Dictionary(Vec::new()), tail));
    }

    let mut pairs = Vec::new();
    loop {
        let (key, after_key) = parse_object(rest)?;
        if !key.tag().is_string() {
            return Err(CodecError::InvalidDictKey { found: key.tag() });
        }
        let after_key = skip_ws(after_key);
        let after_colon = after_key
            .strip_prefix(':')
            .ok_or(CodecError::ParseError {
                at: excerpt(after_key),
            })?;
        let (value, after_value) = parse_object(after_colon)?;
        pairs.push((key, value));
        rest = skip_ws(after_value);

        if let Some(tail) = rest.strip_prefix('}') {
            rest = tail;
            break;
        }
        if let Some(tail) = rest.strip_prefix(',') {
            rest = skip_ws(tail);
            if rest.starts_with('}') {
                return Err(CodecError::TrailingComma { at: excerpt(rest) });
            }
            continue;
        }
        return Err(CodecError::ParseError { at: excerpt(rest) });
    }

    Ok((TaggedObject::Dictionary(pairs), rest))
}

/// Top-level entry point: parse exactly one object, tolerating trailing
/// whitespace but rejecting any trailing non-whitespace input.
pub fn deserialize(text: &str) -> CodecResult<TaggedObject> {
    let (object, rest) = parse_object(text)?;
    let rest = skip_ws(rest);
    if !rest.is_empty() {
        return Err(CodecError::TrailingCharacters {
            remaining: rest.to_string(),
        });
    }
    Ok(object)
}
