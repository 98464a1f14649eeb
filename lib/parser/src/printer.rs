use itertools::Itertools;
use scanner::{Literal, Token};

use crate::{Expr, Visitor};

/// Renders a tree in fully parenthesized prefix notation, e.g.
/// `(* (- 123) (group 45.67))`. Meant for debugging and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        format!("({name} {})", exprs.iter().map(|expr| self.print(expr)).join(" "))
    }
}

impl Visitor<String> for AstPrinter {
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        self.parenthesize(operator.lexeme(), &[left, right])
    }

    fn visit_grouping(&mut self, expression: &Expr) -> String {
        self.parenthesize("group", &[expression])
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> String {
        self.parenthesize(operator.lexeme(), &[right])
    }

    fn visit_literal(&mut self, value: &Literal) -> String {
        value.to_string()
    }
}
