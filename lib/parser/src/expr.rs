use std::fmt::{self, Display, Formatter};

use scanner::{Literal, Token};

use crate::AstPrinter;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Binary { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    Grouping(Box<Expr<'a>>),
    Unary { operator: Token<'a>, right: Box<Expr<'a>> },
    Literal(Literal<'a>),
}

/// An operation over expression trees, one method per kind of node.
///
/// New operations are added by implementing this trait, [`Expr::accept`]
/// picks the method matching the node it is called on.
pub trait Visitor<R> {
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> R;
    fn visit_grouping(&mut self, expression: &Expr) -> R;
    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> R;
    fn visit_literal(&mut self, value: &Literal) -> R;
}

impl<'a> Expr<'a> {
    pub fn binary(left: Expr<'a>, operator: Token<'a>, right: Expr<'a>) -> Self {
        Expr::Binary { left: Box::new(left), operator, right: Box::new(right) }
    }

    pub fn grouping(expression: Expr<'a>) -> Self {
        Expr::Grouping(Box::new(expression))
    }

    pub fn unary(operator: Token<'a>, right: Expr<'a>) -> Self {
        Expr::Unary { operator, right: Box::new(right) }
    }

    pub fn accept<R, V: Visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
        match self {
            Expr::Binary { left, operator, right } => visitor.visit_binary(left, operator, right),
            Expr::Grouping(expression) => visitor.visit_grouping(expression),
            Expr::Unary { operator, right } => visitor.visit_unary(operator, right),
            Expr::Literal(value) => visitor.visit_literal(value),
        }
    }
}

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AstPrinter.print(self))
    }
}

#[cfg(test)]
mod tests {
    use cursor::Line;
    use pretty_assertions::assert_eq;
    use scanner::TokenData;

    use super::*;

    /// Counts nodes and the deepest nesting, without touching `Expr` itself.
    #[derive(Default)]
    struct Shape {
        nodes: usize,
    }

    impl Shape {
        fn depth(&mut self, expr: &Expr) -> usize {
            expr.accept(self)
        }
    }

    impl Visitor<usize> for Shape {
        fn visit_binary(&mut self, left: &Expr, _: &Token, right: &Expr) -> usize {
            self.nodes += 1;
            1 + self.depth(left).max(self.depth(right))
        }

        fn visit_grouping(&mut self, expression: &Expr) -> usize {
            self.nodes += 1;
            1 + self.depth(expression)
        }

        fn visit_unary(&mut self, _: &Token, right: &Expr) -> usize {
            self.nodes += 1;
            1 + self.depth(right)
        }

        fn visit_literal(&mut self, _: &Literal) -> usize {
            self.nodes += 1;
            1
        }
    }

    fn sample() -> Expr<'static> {
        Expr::binary(
            Expr::unary(
                Token::new(TokenData::Minus, "-", Line(1)),
                Expr::Literal(Literal::Number(123.0)),
            ),
            Token::new(TokenData::Star, "*", Line(1)),
            Expr::grouping(Expr::Literal(Literal::Number(45.67))),
        )
    }

    #[test]
    fn display_prints_prefix_notation() {
        assert_eq!(sample().to_string(), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn dispatches_to_the_matching_visit_method() {
        let mut shape = Shape::default();
        let depth = shape.depth(&sample());
        assert_eq!((depth, shape.nodes), (3, 5));

        let mut shape = Shape::default();
        assert_eq!(shape.depth(&Expr::Literal(Literal::Nil)), 1);
        assert_eq!(shape.nodes, 1);
    }

    #[test]
    fn visitor_as_trait_object() {
        let visitor: &mut dyn Visitor<usize> = &mut Shape::default();
        let depth: usize = sample().accept(visitor);
        assert_eq!(depth, 3);
    }
}
