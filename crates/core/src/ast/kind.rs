use std::fmt;

/// Syntactic category of a node.
///
/// Child layouts follow the classic Ruby AST conventions:
///
/// | kind | children |
/// |---|---|
/// | `Class` | `[const, superclass \| nil, body \| nil]` |
/// | `Module` | `[const, body \| nil]` |
/// | `SingletonClass` | `[expr, body \| nil]` |
/// | `Def` | `[:name, args, body \| nil]` |
/// | `Defs` | `[definee, :name, args, body \| nil]` |
/// | `Send`, `Csend` | `[receiver \| nil, :name, *arguments]` |
/// | `Block` | `[send, args, body \| nil]` |
/// | `Const` | `[scope \| nil, :name]` |
/// | `Casgn` | `[scope \| nil, :name, value \| nil]` |
/// | `Lvar`, `Ivar`, `Cvar`, `Gvar` | `[:name]` |
/// | `Lvasgn`, `Ivasgn`, `Cvasgn`, `Gvasgn` | `[:name, value \| nil]` |
/// | `Arg`, `Restarg`, `Kwarg`, `Kwrestarg`, `Blockarg` | `[:name \| nil]` |
/// | `Optarg`, `Kwoptarg` | `[:name, default]` |
/// | `Str` | `["value"]`, `Sym` `[:value]`, `Int` `[integer]`, `Float` `[float]` |
/// | `Pair` | `[key, value]` |
/// | `Irange`, `Erange` | `[begin \| nil, end \| nil]` |
///
/// Every other kind holds a plain list of child nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Begin,
    Class,
    Module,
    SingletonClass,
    Def,
    Defs,
    Args,
    Arg,
    Optarg,
    Restarg,
    Kwarg,
    Kwoptarg,
    Kwrestarg,
    Blockarg,
    ForwardArg,
    Send,
    Csend,
    Block,
    BlockPass,
    Const,
    Cbase,
    Casgn,
    Lvar,
    Lvasgn,
    Ivar,
    Ivasgn,
    Cvar,
    Cvasgn,
    Gvar,
    Gvasgn,
    SelfRef,
    Str,
    Dstr,
    Xstr,
    Sym,
    Dsym,
    Int,
    Float,
    Rational,
    Complex,
    Array,
    Hash,
    Pair,
    Irange,
    Erange,
    Regexp,
    True,
    False,
    Nil,
    Return,
    /// Any construct the index does not interpret. Its children are still lowered.
    Other,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Begin => "begin",
            NodeKind::Class => "class",
            NodeKind::Module => "module",
            NodeKind::SingletonClass => "sclass",
            NodeKind::Def => "def",
            NodeKind::Defs => "defs",
            NodeKind::Args => "args",
            NodeKind::Arg => "arg",
            NodeKind::Optarg => "optarg",
            NodeKind::Restarg => "restarg",
            NodeKind::Kwarg => "kwarg",
            NodeKind::Kwoptarg => "kwoptarg",
            NodeKind::Kwrestarg => "kwrestarg",
            NodeKind::Blockarg => "blockarg",
            NodeKind::ForwardArg => "forward_arg",
            NodeKind::Send => "send",
            NodeKind::Csend => "csend",
            NodeKind::Block => "block",
            NodeKind::BlockPass => "block_pass",
            NodeKind::Const => "const",
            NodeKind::Cbase => "cbase",
            NodeKind::Casgn => "casgn",
            NodeKind::Lvar => "lvar",
            NodeKind::Lvasgn => "lvasgn",
            NodeKind::Ivar => "ivar",
            NodeKind::Ivasgn => "ivasgn",
            NodeKind::Cvar => "cvar",
            NodeKind::Cvasgn => "cvasgn",
            NodeKind::Gvar => "gvar",
            NodeKind::Gvasgn => "gvasgn",
            NodeKind::SelfRef => "self",
            NodeKind::Str => "str",
            NodeKind::Dstr => "dstr",
            NodeKind::Xstr => "xstr",
            NodeKind::Sym => "sym",
            NodeKind::Dsym => "dsym",
            NodeKind::Int => "int",
            NodeKind::Float => "float",
            NodeKind::Rational => "rational",
            NodeKind::Complex => "complex",
            NodeKind::Array => "array",
            NodeKind::Hash => "hash",
            NodeKind::Pair => "pair",
            NodeKind::Irange => "irange",
            NodeKind::Erange => "erange",
            NodeKind::Regexp => "regexp",
            NodeKind::True => "true",
            NodeKind::False => "false",
            NodeKind::Nil => "nil",
            NodeKind::Return => "return",
            NodeKind::Other => "other",
        }
    }

    /// Nodes that open a new namespace.
    pub fn is_namespace(&self) -> bool {
        matches!(self, NodeKind::Class | NodeKind::Module)
    }

    pub fn is_method_definition(&self) -> bool {
        matches!(self, NodeKind::Def | NodeKind::Defs)
    }

    pub fn is_call(&self) -> bool {
        matches!(self, NodeKind::Send | NodeKind::Csend)
    }

    pub fn is_parameter(&self) -> bool {
        matches!(
            self,
            NodeKind::Arg
                | NodeKind::Optarg
                | NodeKind::Restarg
                | NodeKind::Kwarg
                | NodeKind::Kwoptarg
                | NodeKind::Kwrestarg
                | NodeKind::Blockarg
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
