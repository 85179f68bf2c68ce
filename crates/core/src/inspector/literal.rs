use crate::ast::NodeKind;

/// The fixed nominal type of a literal node kind.
pub fn literal_type(kind: NodeKind) -> Option<&'static str> {
    let ty = match kind {
        NodeKind::Str | NodeKind::Dstr | NodeKind::Xstr => "String",
        NodeKind::Sym | NodeKind::Dsym => "Symbol",
        NodeKind::Int => "Integer",
        NodeKind::Float => "Float",
        NodeKind::Rational => "Rational",
        NodeKind::Complex => "Complex",
        NodeKind::Array => "Array",
        NodeKind::Hash => "Hash",
        NodeKind::Irange | NodeKind::Erange => "Range",
        NodeKind::Regexp => "Regexp",
        NodeKind::True => "TrueClass",
        NodeKind::False => "FalseClass",
        NodeKind::Nil => "NilClass",
        _ => return None,
    };
    Some(ty)
}
