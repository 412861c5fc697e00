//! Operator overload detection and canonical operator tokens.
//!
//! Compiled metadata stores operator overloads under special method names
//! (`op_Addition`, `op_Explicit`, ...). The formatter displays the canonical operator
//! token instead of the compiled name, so an addition overload renders as
//! `+(Widget, Widget)` rather than `op_Addition(Widget, Widget)`. Conversion operators
//! get no token at all - they render as `Implicit(<source> to <target>)` /
//! `Explicit(<source> to <target>)`.

use strum::{EnumCount, EnumIter};

/// The kinds of operator overloads a .NET type can declare.
///
/// Mapped from the compiled `op_*` method names defined by the C# language
/// specification (ECMA-334 §14.10) and the CLS operator name conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum OperatorKind {
    /// `op_UnaryPlus`, unary `+`
    UnaryPlus,
    /// `op_UnaryNegation`, unary `-`
    UnaryNegation,
    /// `op_LogicalNot`, `!`
    LogicalNot,
    /// `op_OnesComplement`, `~`
    OnesComplement,
    /// `op_Increment`, `++`
    Increment,
    /// `op_Decrement`, `--`
    Decrement,
    /// `op_True`, `true`
    True,
    /// `op_False`, `false`
    False,
    /// `op_Addition`, binary `+`
    Addition,
    /// `op_Subtraction`, binary `-`
    Subtraction,
    /// `op_Multiply`, `*`
    Multiply,
    /// `op_Division`, `/`
    Division,
    /// `op_Modulus`, `%`
    Modulus,
    /// `op_BitwiseAnd`, `&`
    BitwiseAnd,
    /// `op_BitwiseOr`, `|`
    BitwiseOr,
    /// `op_ExclusiveOr`, `^`
    ExclusiveOr,
    /// `op_LeftShift`, `<<`
    LeftShift,
    /// `op_RightShift`, `>>`
    RightShift,
    /// `op_Equality`, `==`
    Equality,
    /// `op_Inequality`, `!=`
    Inequality,
    /// `op_LessThan`, `<`
    LessThan,
    /// `op_GreaterThan`, `>`
    GreaterThan,
    /// `op_LessThanOrEqual`, `<=`
    LessThanOrEqual,
    /// `op_GreaterThanOrEqual`, `>=`
    GreaterThanOrEqual,
    /// `op_Implicit`, implicit conversion
    Implicit,
    /// `op_Explicit`, explicit conversion
    Explicit,
}

impl OperatorKind {
    /// Detect an operator overload from its compiled method name.
    ///
    /// Returns `None` for regular method names, including names that merely start
    /// with `op_` without matching a known operator.
    #[must_use]
    pub fn from_method_name(name: &str) -> Option<Self> {
        Some(match name {
            "op_UnaryPlus" => OperatorKind::UnaryPlus,
            "op_UnaryNegation" => OperatorKind::UnaryNegation,
            "op_LogicalNot" => OperatorKind::LogicalNot,
            "op_OnesComplement" => OperatorKind::OnesComplement,
            "op_Increment" => OperatorKind::Increment,
            "op_Decrement" => OperatorKind::Decrement,
            "op_True" => OperatorKind::True,
            "op_False" => OperatorKind::False,
            "op_Addition" => OperatorKind::Addition,
            "op_Subtraction" => OperatorKind::Subtraction,
            "op_Multiply" => OperatorKind::Multiply,
            "op_Division" => OperatorKind::Division,
            "op_Modulus" => OperatorKind::Modulus,
            "op_BitwiseAnd" => OperatorKind::BitwiseAnd,
            "op_BitwiseOr" => OperatorKind::BitwiseOr,
            "op_ExclusiveOr" => OperatorKind::ExclusiveOr,
            "op_LeftShift" => OperatorKind::LeftShift,
            "op_RightShift" => OperatorKind::RightShift,
            "op_Equality" => OperatorKind::Equality,
            "op_Inequality" => OperatorKind::Inequality,
            "op_LessThan" => OperatorKind::LessThan,
            "op_GreaterThan" => OperatorKind::GreaterThan,
            "op_LessThanOrEqual" => OperatorKind::LessThanOrEqual,
            "op_GreaterThanOrEqual" => OperatorKind::GreaterThanOrEqual,
            "op_Implicit" => OperatorKind::Implicit,
            "op_Explicit" => OperatorKind::Explicit,
            _ => return None,
        })
    }

    /// The canonical display token for this operator.
    ///
    /// Conversion operators display their conversion keyword because they have no
    /// source-level token of their own.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            OperatorKind::UnaryPlus | OperatorKind::Addition => "+",
            OperatorKind::UnaryNegation | OperatorKind::Subtraction => "-",
            OperatorKind::LogicalNot => "!",
            OperatorKind::OnesComplement => "~",
            OperatorKind::Increment => "++",
            OperatorKind::Decrement => "--",
            OperatorKind::True => "true",
            OperatorKind::False => "false",
            OperatorKind::Multiply => "*",
            OperatorKind::Division => "/",
            OperatorKind::Modulus => "%",
            OperatorKind::BitwiseAnd => "&",
            OperatorKind::BitwiseOr => "|",
            OperatorKind::ExclusiveOr => "^",
            OperatorKind::LeftShift => "<<",
            OperatorKind::RightShift => ">>",
            OperatorKind::Equality => "==",
            OperatorKind::Inequality => "!=",
            OperatorKind::LessThan => "<",
            OperatorKind::GreaterThan => ">",
            OperatorKind::LessThanOrEqual => "<=",
            OperatorKind::GreaterThanOrEqual => ">=",
            OperatorKind::Implicit => "Implicit",
            OperatorKind::Explicit => "Explicit",
        }
    }

    /// Whether this is an implicit or explicit conversion operator.
    ///
    /// Conversion operators render `(<source> to <target>)` instead of a parameter
    /// list, and their overloads are told apart by return type.
    #[must_use]
    pub fn is_conversion(&self) -> bool {
        matches!(self, OperatorKind::Implicit | OperatorKind::Explicit)
    }
}
