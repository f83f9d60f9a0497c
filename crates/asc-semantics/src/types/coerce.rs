// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Static coercion.
//!
//! Decides whether an expression of one type may flow into a location of
//! another, reports the strict-mode diagnostics when it may not, and wraps
//! the expression in a conversion node where the runtime must convert.

use super::{Builtin, Expr, ExprKind, TypeInfo};
use crate::context::Context;
use crate::diag::ErrorCode;

impl Context {
    /// Coerces `expr` of type `actual` to `expected`.
    ///
    /// `actual` is updated in place to the type the returned expression
    /// presents. A conversion node is emitted when `force` or `explicit` is
    /// set or when the static type is unknown. In strict mode, narrowing to a
    /// subtype and converting between unrelated types are reported; numeric
    /// conversions, `XML`/`XMLList` to `String`, and anything flowing into
    /// `Boolean` or out of `null` are silent.
    ///
    /// Lists coerce their last item. Conditionals and the logical operators
    /// coerce each branch separately, so that both arms present the same
    /// type.
    pub fn coerce(
        &mut self,
        mut expr: Expr,
        actual: &mut Option<TypeInfo>,
        expected: Option<TypeInfo>,
        explicit: bool,
        force: bool,
    ) -> Expr {
        let void = self.builtin(Builtin::Void);
        let expected_is_void = expected.is_some_and(|e| e.ty == void);

        match &mut expr.kind {
            ExprKind::List(items) => {
                if let Some(last) = items.pop() {
                    let last = self.coerce(last, actual, expected, explicit, force);
                    items.push(last);
                }
                return expr;
            }
            ExprKind::Conditional {
                then_expr,
                then_type,
                else_expr,
                else_type,
                ..
            } => {
                *actual = *then_type;
                let then_value = core::mem::replace(then_expr.as_mut(), Expr::literal(0, ""));
                **then_expr = self.coerce(then_value, actual, expected, explicit, true);
                *then_type = *actual;

                *actual = *else_type;
                let else_value = core::mem::replace(else_expr.as_mut(), Expr::literal(0, ""));
                **else_expr = self.coerce(else_value, actual, expected, explicit, true);
                *else_type = *actual;
                return expr;
            }
            ExprKind::Binary {
                op,
                lhs,
                lhs_type,
                rhs,
                rhs_type,
            } if op.is_logical()
                && ((expected.is_some() && !expected_is_void) || *lhs_type != *rhs_type) =>
            {
                let branch_expected = if expected_is_void {
                    Some(self.builtin_info(Builtin::Any))
                } else {
                    expected
                };

                *actual = *lhs_type;
                let lhs_value = core::mem::replace(lhs.as_mut(), Expr::literal(0, ""));
                **lhs = self.coerce(lhs_value, actual, branch_expected, explicit, true);
                *lhs_type = *actual;

                *actual = *rhs_type;
                let rhs_value = core::mem::replace(rhs.as_mut(), Expr::literal(0, ""));
                **rhs = self.coerce(rhs_value, actual, branch_expected, explicit, true);
                *rhs_type = *actual;
                return expr;
            }
            _ => {}
        }

        let Some(expected) = expected else {
            if force {
                let any = self.builtin_info(Builtin::Any);
                let from = actual.replace(any);
                return expr.coerced(from, any, explicit);
            }
            return expr;
        };

        if expected.ty == void {
            *actual = Some(expected);
            expr.void_result();
            return expr;
        }

        let Some(from) = *actual else {
            *actual = Some(expected);
            return expr.coerced(None, expected, explicit);
        };

        if from.ty == expected.ty || self.types.includes(expected.ty, from.ty) {
            if force {
                *actual = Some(expected);
                return expr.coerced(Some(from), expected, explicit);
            }
            return expr;
        }

        if self.config.strict {
            self.check_coercion(&expr, from, expected, explicit);
        }

        if force || explicit {
            *actual = Some(expected);
            return expr.coerced(Some(from), expected, explicit);
        }
        expr
    }

    /// Reports a narrowing or unrelated conversion.
    fn check_coercion(&mut self, expr: &Expr, from: TypeInfo, expected: TypeInfo, explicit: bool) {
        let null = self.builtin(Builtin::Null);
        let boolean = self.builtin(Builtin::Boolean);
        if from.ty == null || expected.ty == boolean {
            return;
        }

        let from_info = TypeInfo::new(from.ty, true, from.explicit);
        if self.types.info_includes(from_info, expected) {
            let vector_object = self.builtin(Builtin::VectorObject);
            let any = self.builtin(Builtin::Any);
            if from.ty == vector_object && self.types.get(expected.ty).base == Some(vector_object) {
                return;
            }
            if !explicit && from.ty != any {
                let (from_name, expected_name) =
                    (self.types.name(from.ty), self.types.name(expected.ty));
                self.error(
                    expr.position,
                    ErrorCode::ImplicitCoercionToSubtype,
                    &[&from_name, &expected_name],
                );
            }
            return;
        }

        let string = self.builtin(Builtin::String);
        let xml = self.builtin(Builtin::Xml);
        let xml_list = self.builtin(Builtin::XmlList);
        if expected.ty == string && (from.ty == xml || from.ty == xml_list) {
            return;
        }

        if !(self.types.is_numeric(from.ty) && self.types.is_numeric(expected.ty)) {
            let (from_name, expected_name) =
                (self.types.name(from.ty), self.types.name(expected.ty));
            self.error(
                expr.position,
                ErrorCode::UnrelatedTypeCoercion,
                &[&from_name, &expected_name],
            );
        }
    }
}
