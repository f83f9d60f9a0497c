// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Minimal expression tree seen by the coercion engine.
//!
//! The parser's full node set is not modeled here. Coercion only needs to
//! tell lists, conditionals, and the logical operators apart from everything
//! else, and to wrap an expression in a coercion node.

use super::TypeInfo;

/// Binary operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
    /// `&&`
    LogicalAnd,
    /// `||`
    LogicalOr,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `==`
    Equals,
    /// `<`
    Less,
}

impl BinaryOp {
    /// Returns true for `&&` and `||`, whose value is one of the operands.
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::LogicalAnd | Self::LogicalOr)
    }
}

/// Expression node shapes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ExprKind {
    /// Comma list; its value is the last item.
    List(Vec<Expr>),
    /// `condition ? then_expr : else_expr`, with the branch types.
    Conditional {
        /// Condition.
        condition: Box<Expr>,
        /// Value when the condition holds.
        then_expr: Box<Expr>,
        /// Static type of `then_expr`.
        then_type: Option<TypeInfo>,
        /// Value otherwise.
        else_expr: Box<Expr>,
        /// Static type of `else_expr`.
        else_type: Option<TypeInfo>,
    },
    /// Binary operation, with the operand types.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Static type of `lhs`.
        lhs_type: Option<TypeInfo>,
        /// Right operand.
        rhs: Box<Expr>,
        /// Static type of `rhs`.
        rhs_type: Option<TypeInfo>,
    },
    /// Conversion inserted by the coercion engine.
    Coerce {
        /// Converted expression.
        expr: Box<Expr>,
        /// Type before conversion.
        actual: Option<TypeInfo>,
        /// Type after conversion.
        expected: TypeInfo,
        /// Written as a cast rather than inferred.
        explicit: bool,
    },
    /// Literal in source form.
    Literal(String),
    /// Reference by name.
    Name(String),
}

/// Expression node.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Expr {
    /// Character offset in the source.
    pub position: usize,
    /// Node shape.
    pub kind: ExprKind,
    /// Value is discarded.
    pub void_result: bool,
}

impl Expr {
    /// Creates a node at `position`.
    #[must_use]
    pub const fn new(position: usize, kind: ExprKind) -> Self {
        Self {
            position,
            kind,
            void_result: false,
        }
    }

    /// Literal node.
    #[must_use]
    pub fn literal(position: usize, text: impl Into<String>) -> Self {
        Self::new(position, ExprKind::Literal(text.into()))
    }

    /// Name reference node.
    #[must_use]
    pub fn name(position: usize, name: impl Into<String>) -> Self {
        Self::new(position, ExprKind::Name(name.into()))
    }

    /// Comma list; positioned at its first item.
    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        let position = items.first().map_or(0, |e| e.position);
        Self::new(position, ExprKind::List(items))
    }

    /// Conditional node positioned at its condition.
    #[must_use]
    pub fn conditional(
        condition: Self,
        then_expr: Self,
        then_type: Option<TypeInfo>,
        else_expr: Self,
        else_type: Option<TypeInfo>,
    ) -> Self {
        Self::new(
            condition.position,
            ExprKind::Conditional {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                then_type,
                else_expr: Box::new(else_expr),
                else_type,
            },
        )
    }

    /// Binary node positioned at its left operand.
    #[must_use]
    pub fn binary(
        op: BinaryOp,
        lhs: Self,
        lhs_type: Option<TypeInfo>,
        rhs: Self,
        rhs_type: Option<TypeInfo>,
    ) -> Self {
        Self::new(
            lhs.position,
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                lhs_type,
                rhs: Box::new(rhs),
                rhs_type,
            },
        )
    }

    /// Wraps `self` in a coercion to `expected`.
    #[must_use]
    pub fn coerced(self, actual: Option<TypeInfo>, expected: TypeInfo, explicit: bool) -> Self {
        let position = self.position;
        Self::new(
            position,
            ExprKind::Coerce {
                expr: Box::new(self),
                actual,
                expected,
                explicit,
            },
        )
    }

    /// Marks the value as discarded.
    pub const fn void_result(&mut self) {
        self.void_result = true;
    }

    /// Target type if this is a coercion node.
    #[must_use]
    pub const fn coerced_to(&self) -> Option<TypeInfo> {
        match &self.kind {
            ExprKind::Coerce { expected, .. } => Some(*expected),
            _ => None,
        }
    }
}
