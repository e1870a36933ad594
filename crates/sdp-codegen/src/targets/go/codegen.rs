// SPDX-License-Identifier: Apache-2.0
//! String-template Go source generation. Thinner than `targets::rust`'s
//! token-stream approach on purpose — it exists to prove the [`crate::Backend`]
//! trait is genuinely backend-neutral, not to be the reference target.
//!
//! As in the `rust` backend, array elements are only ever `Primitive` or
//! `Named` (the validator forbids nested arrays/optionals), so the array
//! helpers below don't handle those shapes.

use super::naming::{
    decode_fn_name, encode_fn_name, message_decode_fn_name, message_encode_fn_name, size_fn_name,
    to_pascal_case, type_id_const_name,
};
use sdp_ir::{Decl, PrimitiveKind, Schema, TypeExpr};
use std::fmt::Write as _;

fn go_primitive_type(p: PrimitiveKind) -> &'static str {
    match p {
        PrimitiveKind::U8 => "uint8",
        PrimitiveKind::U16 => "uint16",
        PrimitiveKind::U32 => "uint32",
        PrimitiveKind::U64 => "uint64",
        PrimitiveKind::I8 => "int8",
        PrimitiveKind::I16 => "int16",
        PrimitiveKind::I32 => "int32",
        PrimitiveKind::I64 => "int64",
        PrimitiveKind::F32 => "float32",
        PrimitiveKind::F64 => "float64",
        PrimitiveKind::Bool => "bool",
        PrimitiveKind::Str => "string",
        PrimitiveKind::Bytes => "[]byte",
    }
}

pub fn go_type(ty: &TypeExpr, schema: &Schema) -> String {
    match ty {
        TypeExpr::Primitive(p) => go_primitive_type(*p).to_string(),
        TypeExpr::Named(id) => schema.decl(*id).name.clone(),
        TypeExpr::Array(elem) => format!("[]{}", go_type(elem, schema)),
        TypeExpr::Optional(id) => format!("*{}", schema.decl(*id).name),
    }
}

pub fn type_decl(decl: &Decl, schema: &Schema) -> String {
    let mut out = String::new();
    if let Some(doc) = &decl.doc {
        for line in doc.lines() {
            let _ = writeln!(out, "// {line}");
        }
    }
    let _ = writeln!(out, "type {} struct {{", decl.name);
    for field in &decl.fields {
        let _ = writeln!(
            out,
            "\t{} {}",
            to_pascal_case(&field.name),
            go_type(&field.ty, schema)
        );
    }
    out.push_str("}\n\n");
    out
}

/// Emits statements that add a field's contribution to `total`, rather
/// than a single expression, so arrays can sum per-element sizes with a
/// plain `for` loop instead of a generic helper.
fn field_size_stmt(ty: &TypeExpr, accessor: &str, schema: &Schema) -> String {
    match ty {
        TypeExpr::Primitive(p) => match p.fixed_width() {
            Some(w) => format!("\ttotal += {w}\n"),
            None => format!("\ttotal += 4 + len({accessor})\n"),
        },
        TypeExpr::Named(id) => format!(
            "\ttotal += {}(&{accessor})\n",
            size_fn_name(&schema.decl(*id).name)
        ),
        TypeExpr::Array(elem) => array_size_stmt(elem, accessor, schema),
        TypeExpr::Optional(id) => {
            let size_fn = size_fn_name(&schema.decl(*id).name);
            format!(
                "\ttotal += 1\n\tif {accessor} != nil {{\n\t\ttotal += {size_fn}({accessor})\n\t}}\n"
            )
        }
    }
}

fn array_size_stmt(elem: &TypeExpr, accessor: &str, schema: &Schema) -> String {
    let mut out = format!("\ttotal += 4\n\tfor _, elem := range {accessor} {{\n");
    match elem {
        TypeExpr::Primitive(p) => match p.fixed_width() {
            Some(w) => {
                let _ = writeln!(out, "\t\ttotal += {w}");
            }
            None => {
                let _ = writeln!(out, "\t\ttotal += 4 + len(elem)");
            }
        },
        TypeExpr::Named(id) => {
            let size_fn = size_fn_name(&schema.decl(*id).name);
            let _ = writeln!(out, "\t\ttotal += {size_fn}(&elem)");
        }
        TypeExpr::Array(_) | TypeExpr::Optional(_) => {
            unreachable!("validator forbids array elements that are themselves array/optional")
        }
    }
    out.push_str("\t}\n");
    out
}

pub fn size_fn(decl: &Decl, schema: &Schema) -> String {
    let fn_name = size_fn_name(&decl.name);
    let mut out = String::new();
    let _ = writeln!(out, "// {fn_name} returns the exact wire size of value without encoding it.");
    let _ = writeln!(out, "func {fn_name}(value *{}) int {{", decl.name);
    out.push_str("\ttotal := 0\n");
    for field in &decl.fields {
        let accessor = format!("value.{}", to_pascal_case(&field.name));
        out.push_str(&field_size_stmt(&field.ty, &accessor, schema));
    }
    out.push_str("\treturn total\n}\n\n");
    out
}

fn field_encode_stmt(ty: &TypeExpr, accessor: &str, schema: &Schema) -> String {
    match ty {
        TypeExpr::Primitive(p) => format!("\twrite{}{accessor})\n", primitive_write_suffix(*p)),
        TypeExpr::Named(id) => format!(
            "\t{}(&{accessor}, buf)\n",
            encode_fn_name(&schema.decl(*id).name)
        ),
        TypeExpr::Array(elem) => array_encode_stmt(elem, accessor, schema),
        TypeExpr::Optional(id) => {
            let encode_fn = encode_fn_name(&schema.decl(*id).name);
            format!(
                "\tif {accessor} != nil {{\n\t\twritePresence(buf, true)\n\t\t{encode_fn}({accessor}, buf)\n\t}} else {{\n\t\twritePresence(buf, false)\n\t}}\n"
            )
        }
    }
}

fn primitive_write_suffix(p: PrimitiveKind) -> &'static str {
    match p {
        PrimitiveKind::U8 => "U8(buf, ",
        PrimitiveKind::U16 => "U16(buf, ",
        PrimitiveKind::U32 => "U32(buf, ",
        PrimitiveKind::U64 => "U64(buf, ",
        PrimitiveKind::I8 => "I8(buf, ",
        PrimitiveKind::I16 => "I16(buf, ",
        PrimitiveKind::I32 => "I32(buf, ",
        PrimitiveKind::I64 => "I64(buf, ",
        PrimitiveKind::F32 => "F32(buf, ",
        PrimitiveKind::F64 => "F64(buf, ",
        PrimitiveKind::Bool => "Bool(buf, ",
        PrimitiveKind::Str => "Str(buf, ",
        PrimitiveKind::Bytes => "Bytes(buf, ",
    }
}

fn array_encode_stmt(elem: &TypeExpr, accessor: &str, schema: &Schema) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\twriteArrayLen(buf, uint32(len({accessor})))");
    let _ = writeln!(out, "\tfor _, elem := range {accessor} {{");
    match elem {
        TypeExpr::Primitive(p) => {
            let _ = writeln!(out, "\t\twrite{}elem)", primitive_write_suffix(*p));
        }
        TypeExpr::Named(id) => {
            let encode_fn = encode_fn_name(&schema.decl(*id).name);
            let _ = writeln!(out, "\t\t{encode_fn}(&elem, buf)");
        }
        TypeExpr::Array(_) | TypeExpr::Optional(_) => {
            unreachable!("validator forbids array elements that are themselves array/optional")
        }
    }
    out.push_str("\t}\n");
    out
}

pub fn encode_fn(decl: &Decl, schema: &Schema) -> String {
    let fn_name = encode_fn_name(&decl.name);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "// {fn_name} appends value's byte-mode encoding to buf."
    );
    let _ = writeln!(out, "func {fn_name}(value *{}, buf *[]byte) {{", decl.name);
    for field in &decl.fields {
        let accessor = format!("value.{}", to_pascal_case(&field.name));
        out.push_str(&field_encode_stmt(&field.ty, &accessor, schema));
    }
    out.push_str("}\n\n");
    out
}

fn field_decode_stmt(ty: &TypeExpr, field_go_name: &str, schema: &Schema) -> String {
    match ty {
        TypeExpr::Primitive(p) => format!(
            "\t{field_go_name}, err := read{}ctx)\n\tif err != nil {{\n\t\treturn out, err\n\t}}\n\tout.{field_go_name} = {field_go_name}\n",
            primitive_read_suffix(*p)
        ),
        TypeExpr::Named(id) => {
            let decode_fn = decode_fn_name(&schema.decl(*id).name);
            format!(
                "\tif err := ctx.enterNesting(); err != nil {{\n\t\treturn out, err\n\t}}\n\t{field_go_name}, err := {decode_fn}(bytes, ctx)\n\tctx.exitNesting()\n\tif err != nil {{\n\t\treturn out, err\n\t}}\n\tout.{field_go_name} = {field_go_name}\n"
            )
        }
        TypeExpr::Array(elem) => array_decode_stmt(elem, field_go_name, schema),
        TypeExpr::Optional(id) => {
            let decode_fn = decode_fn_name(&schema.decl(*id).name);
            format!(
                "\tpresent, err := readPresence(bytes, ctx)\n\tif err != nil {{\n\t\treturn out, err\n\t}}\n\tif present {{\n\t\tif err := ctx.enterNesting(); err != nil {{\n\t\t\treturn out, err\n\t\t}}\n\t\tinner, err := {decode_fn}(bytes, ctx)\n\t\tctx.exitNesting()\n\t\tif err != nil {{\n\t\t\treturn out, err\n\t\t}}\n\t\tout.{field_go_name} = &inner\n\t}}\n"
            )
        }
    }
}

fn primitive_read_suffix(p: PrimitiveKind) -> &'static str {
    match p {
        PrimitiveKind::U8 => "U8(bytes, ",
        PrimitiveKind::U16 => "U16(bytes, ",
        PrimitiveKind::U32 => "U32(bytes, ",
        PrimitiveKind::U64 => "U64(bytes, ",
        PrimitiveKind::I8 => "I8(bytes, ",
        PrimitiveKind::I16 => "I16(bytes, ",
        PrimitiveKind::I32 => "I32(bytes, ",
        PrimitiveKind::I64 => "I64(bytes, ",
        PrimitiveKind::F32 => "F32(bytes, ",
        PrimitiveKind::F64 => "F64(bytes, ",
        PrimitiveKind::Bool => "Bool(bytes, ",
        PrimitiveKind::Str => "Str(bytes, ",
        PrimitiveKind::Bytes => "Bytes(bytes, ",
    }
}

fn array_element_go_type(elem: &TypeExpr, schema: &Schema) -> String {
    match elem {
        TypeExpr::Primitive(p) => go_primitive_type(*p).to_string(),
        TypeExpr::Named(id) => schema.decl(*id).name.clone(),
        TypeExpr::Array(_) | TypeExpr::Optional(_) => {
            unreachable!("validator forbids array elements that are themselves array/optional")
        }
    }
}

fn array_decode_stmt(elem: &TypeExpr, field_go_name: &str, schema: &Schema) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\tcount, err := readArrayLen(bytes, ctx)");
    out.push_str("\tif err != nil {\n\t\treturn out, err\n\t}\n");
    let _ = writeln!(
        out,
        "\t{field_go_name} := make([]{}, 0, count)",
        array_element_go_type(elem, schema)
    );
    out.push_str("\tfor i := uint32(0); i < count; i++ {\n");
    match elem {
        TypeExpr::Primitive(p) => {
            let _ = writeln!(out, "\t\tv, err := read{}ctx)", primitive_read_suffix(*p));
            out.push_str("\t\tif err != nil {\n\t\t\treturn out, err\n\t\t}\n");
            let _ = writeln!(out, "\t\t{field_go_name} = append({field_go_name}, v)");
        }
        TypeExpr::Named(id) => {
            let decode_fn = decode_fn_name(&schema.decl(*id).name);
            out.push_str("\t\tif err := ctx.enterNesting(); err != nil {\n\t\t\treturn out, err\n\t\t}\n");
            let _ = writeln!(out, "\t\tv, err := {decode_fn}(bytes, ctx)");
            out.push_str("\t\tctx.exitNesting()\n");
            out.push_str("\t\tif err != nil {\n\t\t\treturn out, err\n\t\t}\n");
            let _ = writeln!(out, "\t\t{field_go_name} = append({field_go_name}, v)");
        }
        TypeExpr::Array(_) | TypeExpr::Optional(_) => unreachable!(),
    }
    out.push_str("\t}\n");
    let _ = writeln!(out, "\tout.{field_go_name} = {field_go_name}");
    out
}

pub fn decode_fn(decl: &Decl, schema: &Schema) -> String {
    let fn_name = decode_fn_name(&decl.name);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "// {fn_name} decodes a value starting at ctx.Offset, advancing ctx past it."
    );
    let _ = writeln!(
        out,
        "func {fn_name}(bytes []byte, ctx *DecodeContext) ({}, error) {{",
        decl.name
    );
    let _ = writeln!(out, "\tvar out {}", decl.name);
    for field in &decl.fields {
        let field_go_name = to_pascal_case(&field.name);
        out.push_str(&field_decode_stmt(&field.ty, &field_go_name, schema));
    }
    out.push_str("\treturn out, nil\n}\n\n");
    out
}

pub fn type_id_const(decl: &Decl) -> String {
    format!(
        "const {} uint16 = {}\n\n",
        type_id_const_name(&decl.name),
        decl.type_id
    )
}

pub fn message_encode_fn(decl: &Decl) -> String {
    let fn_name = message_encode_fn_name(&decl.name);
    let size_fn = size_fn_name(&decl.name);
    let encode_fn = encode_fn_name(&decl.name);
    let type_id_const = type_id_const_name(&decl.name);
    format!(
        "// {fn_name} frames value with the 10-byte message header and its byte-mode encoding.\nfunc {fn_name}(value *{name}) []byte {{\n\tpayloadLen := uint32({size_fn}(value))\n\tbuf := make([]byte, 0, MessageHeaderSize+int(payloadLen))\n\twriteMessageHeader(&buf, {type_id_const}, payloadLen)\n\t{encode_fn}(value, &buf)\n\treturn buf\n}}\n\n",
        name = decl.name,
    )
}

pub fn message_decode_fn(decl: &Decl) -> String {
    let fn_name = message_decode_fn_name(&decl.name);
    let decode_fn = decode_fn_name(&decl.name);
    let type_id_const = type_id_const_name(&decl.name);
    format!(
        "// {fn_name} validates the message header and decodes its payload.\nfunc {fn_name}(bytes []byte) ({name}, error) {{\n\tvar out {name}\n\tif err := checkInputSize(bytes); err != nil {{\n\t\treturn out, err\n\t}}\n\theader, err := readMessageHeader(bytes)\n\tif err != nil {{\n\t\treturn out, err\n\t}}\n\tif header.TypeID != {type_id_const} {{\n\t\treturn out, &UnknownMessageTypeError{{ID: header.TypeID}}\n\t}}\n\tpayload := bytes[MessageHeaderSize:]\n\tctx := &DecodeContext{{}}\n\treturn {decode_fn}(payload, ctx)\n}}\n\n",
        name = decl.name,
    )
}

pub fn dispatched_decoder(schema: &Schema) -> String {
    let mut out = String::new();
    out.push_str("// DecodeMessage validates the common header and dispatches to the matching\n// per-type message decoder, returning the decoded value as interface{}.\n");
    out.push_str("func DecodeMessage(bytes []byte) (interface{}, error) {\n");
    out.push_str("\tif err := checkInputSize(bytes); err != nil {\n\t\treturn nil, err\n\t}\n");
    out.push_str("\theader, err := readMessageHeader(bytes)\n\tif err != nil {\n\t\treturn nil, err\n\t}\n");
    out.push_str("\tswitch header.TypeID {\n");
    for decl in schema.messages() {
        let const_name = type_id_const_name(&decl.name);
        let decode_fn = message_decode_fn_name(&decl.name);
        let _ = writeln!(out, "\tcase {const_name}:\n\t\treturn {decode_fn}(bytes)");
    }
    out.push_str("\tdefault:\n\t\treturn nil, &UnknownMessageTypeError{ID: header.TypeID}\n\t}\n}\n");
    out
}
