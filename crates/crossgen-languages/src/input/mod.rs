//! Input readers - parse source code into IR.

#[cfg(feature = "read-java")]
pub mod java;

#[cfg(feature = "read-java")]
pub use java::{JAVA_READER, JavaReader, read_java};

#[cfg(feature = "read-kotlin")]
pub mod kotlin;

#[cfg(feature = "read-kotlin")]
pub use kotlin::{KOTLIN_READER, KotlinReader, read_kotlin};

use crossgen_ir::{AssignmentOperator, BinaryOperator, UnaryOperator};

/// Binary operator spelled `token`. Tokens outside the closed set (`===`,
/// `..`, `>>>`) are carried as `Other`.
pub(crate) fn binary_operator(token: &str) -> BinaryOperator {
    match token {
        "+" => BinaryOperator::Plus,
        "-" => BinaryOperator::Minus,
        "*" => BinaryOperator::Multiply,
        "/" => BinaryOperator::Divide,
        "%" => BinaryOperator::Modulo,
        "==" => BinaryOperator::Equals,
        "!=" => BinaryOperator::NotEquals,
        ">" => BinaryOperator::Greater,
        ">=" => BinaryOperator::GreaterOrEqual,
        "<" => BinaryOperator::Less,
        "<=" => BinaryOperator::LessOrEqual,
        "&&" => BinaryOperator::And,
        "||" => BinaryOperator::Or,
        "&" => BinaryOperator::BitwiseAnd,
        "|" => BinaryOperator::BitwiseOr,
        "^" => BinaryOperator::BitwiseXor,
        "<<" => BinaryOperator::ShiftLeft,
        ">>" => BinaryOperator::ShiftRight,
        other => BinaryOperator::other(other),
    }
}

pub(crate) fn unary_operator(token: &str) -> UnaryOperator {
    match token {
        "!" => UnaryOperator::Not,
        "+" => UnaryOperator::Plus,
        "-" => UnaryOperator::Minus,
        "++" => UnaryOperator::Increment,
        "--" => UnaryOperator::Decrement,
        other => UnaryOperator::other(other),
    }
}

pub(crate) fn assignment_operator(token: &str) -> AssignmentOperator {
    match token {
        "=" => AssignmentOperator::Assign,
        "+=" => AssignmentOperator::PlusAssign,
        "-=" => AssignmentOperator::MinusAssign,
        "*=" => AssignmentOperator::MultiplyAssign,
        "/=" => AssignmentOperator::DivideAssign,
        "%=" => AssignmentOperator::ModuloAssign,
        other => AssignmentOperator::other(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_outside_the_closed_set_pass_through() {
        assert_eq!(binary_operator("&&"), BinaryOperator::And);
        assert_eq!(binary_operator(">>>"), BinaryOperator::other(">>>"));
        assert_eq!(unary_operator("~"), UnaryOperator::other("~"));
        assert_eq!(assignment_operator("<<="), AssignmentOperator::other("<<="));
        assert_eq!(assignment_operator("="), AssignmentOperator::Assign);
    }
}
