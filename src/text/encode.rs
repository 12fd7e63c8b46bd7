use crate::autotag::autotag_default;
use crate::error::CodecResult;
use crate::object::TaggedObject;
use crate::value::Value;

/// Top-level entry point: `autotag` the value, then render it as text.
pub fn serialize(value: impl Into<Value>) -> CodecResult<String> {
    let tagged = autotag_default(&value.into())?;
    let mut out = String::new();
    write_object(&mut out, &tagged)?;
    Ok(out)
}

/// Render `object` as its suffix-typed text literal, appending to `out`.
pub fn write_object(out: &mut String, object: &TaggedObject) -> CodecResult<()> {
    match object {
        TaggedObject::Void => out.push_str("null"),
        TaggedObject::True => out.push_str("true"),
        TaggedObject::False => out.push_str("false"),

        TaggedObject::Int8(v) => out.push_str(&format!("{}i8", v)),
        TaggedObject::Int16(v) => out.push_str(&format!("{}i16", v)),
        TaggedObject::Int32(v) => out.push_str(&format!("{}i32", v)),
        TaggedObject::Int64(v) => out.push_str(&format!("{}i64", v)),

        // Expanded to plain decimal digits (never scientific notation) to
        // match the grammar's `-?\d+\.\d+`, which has no exponent form.
        TaggedObject::Float(v) => out.push_str(&format!("{}f", format_decimal_f32(*v))),
        TaggedObject::Double(v) => out.push_str(&format!("{}d", format_decimal_f64(*v))),

        TaggedObject::Binary(bytes) => {
            out.push('"');
            out.push_str(&encode_hex(bytes));
            out.push_str("\"b");
        }
        TaggedObject::Utf8(s) => {
            out.push('"');
            out.push_str(s);
            out.push_str("\"utf8");
        }
        TaggedObject::Utf16(s) => {
            out.push('"');
            out.push_str(s);
            out.push_str("\"utf16");
        }
        TaggedObject::Utf32(s) => {
            out.push('"');
            out.push_str(s);
            out.push_str("\"utf32");
        }

        TaggedObject::List { items, .. } => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_object(out, item)?;
            }
            out.push(']');
        }

        TaggedObject::Dictionary(pairs) => {
            out.push_str("{ ");
            for (i, (key, value)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_object(out, key)?;
                out.push_str(": ");
                write_object(out, value)?;
            }
            out.push_str(" }");
        }
    }
    Ok(())
}

/// Render `v` as plain decimal digits with no exponent, preserving
/// whatever digits Rust's shortest-round-trip float formatter chooses.
/// Rust's `Display`/`Debug` float formatters switch to scientific notation
/// well inside ordinary double range (`1e16`, `5e-324`, ...), which the
/// grammar's `-?\d+\.\d+` has no way to read back. Hand-rolled, the same
/// way `encode_hex` above hand-rolls hex instead of reaching for a crate:
/// take the shortest-round-trip digits from `{:e}` and re-point the
/// decimal manually rather than truncating or rounding to a fixed
/// precision.
pub(crate) fn format_decimal_f64(v: f64) -> String {
    expand_scientific(&format!("{:e}", v))
}

pub(crate) fn format_decimal_f32(v: f32) -> String {
    expand_scientific(&format!("{:e}", v))
}

/// Turn `[-]d[.ddd]e[-]N` (Rust's `LowerExp` output) into a plain decimal
/// string with no exponent and at least one digit on each side of the
/// point. Falls back to the input unchanged for non-finite values (`NaN`,
/// `inf`, `-inf`), which `LowerExp` renders without an `e` at all.
fn expand_scientific(sci: &str) -> String {
    let negative = sci.starts_with('-');
    let unsigned = if negative { &sci[1..] } else { sci };

    let e_pos = match unsigned.find('e') {
        Some(pos) => pos,
        None => return sci.to_string(),
    };
    let mantissa = &unsigned[..e_pos];
    let exponent: i32 = unsigned[e_pos + 1..]
        .parse()
        .expect("LowerExp always emits a plain integer exponent");

    let (int_digits, frac_digits) = match mantissa.find('.') {
        Some(dot) => (&mantissa[..dot], &mantissa[dot + 1..]),
        None => (mantissa, ""),
    };
    let digits = format!("{}{}", int_digits, frac_digits);
    // Position of the decimal point, counted from the left of `digits`.
    let point = int_digits.len() as i64 + exponent as i64;

    let mut body = String::with_capacity(digits.len() + 8);
    if point <= 0 {
        body.push('0');
        body.push('.');
        body.extend(std::iter::repeat('0').take((-point) as usize));
        body.push_str(&digits);
    } else if (point as usize) >= digits.len() {
        body.push_str(&digits);
        body.extend(std::iter::repeat('0').take(point as usize - digits.len()));
        body.push_str(".0");
    } else {
        let (int_part, frac_part) = digits.split_at(point as usize);
        body.push_str(int_part);
        body.push('.');
        body.push_str(frac_part);
    }

    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Lowercase, two-nibbles-per-byte hex — hand-rolled to match the corpus,
/// none of which pulls in a dedicated `hex` crate for this.
pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(DIGITS[(byte >> 4) as usize] as char);
        out.push(DIGITS[(byte & 0x0F) as usize] as char);
    }
    out
}
