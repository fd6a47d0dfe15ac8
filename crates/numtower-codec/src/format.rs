//! Value wire format
//!
//! A value is a one-byte kind tag followed by its payload, all multi-byte
//! fields big-endian:
//!
//! | tag | kind     | payload                                        |
//! |-----|----------|------------------------------------------------|
//! | 0   | invalid  | none                                           |
//! | 1   | integer  | `i64`                                          |
//! | 2   | real     | `f64`                                          |
//! | 3   | complex  | `f64` real part, `f64` imaginary part          |
//! | 4   | constant | `u32` id                                       |
//! | 5   | matrix   | `u8` cols, `u8` rows, then each element, row-major |
//!
//! Decoding reproduces the encoded kinds exactly; no canonicalization is
//! applied.

use crate::{CodecError, CodecResult};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use numtower_value::{ConstantKind, Kind, Matrix, NumberValue, MAX_DIMENSION};
use std::io::{Cursor, Read, Write};

/// Deepest matrix-within-matrix nesting accepted in either direction
pub const MAX_NESTING: usize = 32;

/// Encode a value into a fresh buffer
pub fn to_bytes(value: &NumberValue) -> CodecResult<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded_len_hint(value));
    write_value(&mut out, value)?;
    Ok(out)
}

/// Decode exactly one value; leftover input is an error
pub fn from_bytes(bytes: &[u8]) -> CodecResult<NumberValue> {
    let mut cursor = Cursor::new(bytes);
    let value = read_value(&mut cursor)?;
    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        log::warn!(
            "value decoded from {consumed} of {} bytes; rejecting trailing data",
            bytes.len()
        );
        return Err(CodecError::TrailingBytes(bytes.len() - consumed));
    }
    Ok(value)
}

pub fn write_value<W: Write>(writer: &mut W, value: &NumberValue) -> CodecResult<()> {
    write_nested(writer, value, 0)
}

pub fn read_value<R: Read>(reader: &mut R) -> CodecResult<NumberValue> {
    read_nested(reader, 0)
}

fn write_nested<W: Write>(writer: &mut W, value: &NumberValue, depth: usize) -> CodecResult<()> {
    if depth > MAX_NESTING {
        return Err(CodecError::NestingTooDeep(MAX_NESTING));
    }

    writer.write_u8(value.kind().tag())?;
    match value {
        NumberValue::Invalid => {}
        NumberValue::Integer(n) => writer.write_i64::<BigEndian>(*n)?,
        NumberValue::Real(x) => writer.write_f64::<BigEndian>(*x)?,
        NumberValue::Complex(re, im) => {
            writer.write_f64::<BigEndian>(*re)?;
            writer.write_f64::<BigEndian>(*im)?;
        }
        NumberValue::Constant(c) => writer.write_u32::<BigEndian>(c.id())?,
        NumberValue::Matrix(m) => {
            writer.write_u8(m.cols() as u8)?;
            writer.write_u8(m.rows() as u8)?;
            for element in m.elements() {
                write_nested(writer, element, depth + 1)?;
            }
        }
    }
    Ok(())
}

fn read_nested<R: Read>(reader: &mut R, depth: usize) -> CodecResult<NumberValue> {
    if depth > MAX_NESTING {
        return Err(CodecError::NestingTooDeep(MAX_NESTING));
    }

    let tag = reader.read_u8()?;
    let kind = Kind::from_tag(tag).ok_or(CodecError::UnknownTag(tag))?;
    let value = match kind {
        Kind::Invalid => NumberValue::Invalid,
        Kind::Integer => NumberValue::Integer(reader.read_i64::<BigEndian>()?),
        Kind::Real => NumberValue::Real(reader.read_f64::<BigEndian>()?),
        Kind::Complex => {
            let re = reader.read_f64::<BigEndian>()?;
            let im = reader.read_f64::<BigEndian>()?;
            NumberValue::Complex(re, im)
        }
        Kind::Constant => {
            let id = reader.read_u32::<BigEndian>()?;
            let constant = ConstantKind::from_id(id).ok_or(CodecError::UnknownConstant(id))?;
            NumberValue::Constant(constant)
        }
        Kind::Matrix => {
            let cols = checked_dimension(reader.read_u8()?)?;
            let rows = checked_dimension(reader.read_u8()?)?;
            let mut elements = Vec::with_capacity(rows * cols);
            for _ in 0..rows * cols {
                elements.push(read_nested(reader, depth + 1)?);
            }
            let matrix = Matrix::new(rows, cols, elements)
                .map_err(|err| CodecError::Corrupted(err.to_string()))?;
            NumberValue::Matrix(matrix)
        }
    };
    Ok(value)
}

fn checked_dimension(raw: u8) -> CodecResult<usize> {
    let dim = raw as usize;
    if dim > MAX_DIMENSION {
        return Err(CodecError::DimensionOutOfRange(dim));
    }
    Ok(dim)
}

fn encoded_len_hint(value: &NumberValue) -> usize {
    match value {
        NumberValue::Invalid => 1,
        NumberValue::Integer(_) | NumberValue::Real(_) => 9,
        NumberValue::Complex(..) => 17,
        NumberValue::Constant(_) => 5,
        NumberValue::Matrix(m) => 3 + m.elements().iter().map(encoded_len_hint).sum::<usize>(),
    }
}
