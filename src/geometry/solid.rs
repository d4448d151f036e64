//! Folding geometry expressions into solids.
//!
//! The solid kernel lives outside this crate; anything that can intersect,
//! unite and complement implements [`Solid`]. [`Csg`] is a symbolic
//! implementation that records the folded tree.

use std::fmt;

use super::ast::{GeometryNode, Label, UnaryOp};
use crate::error::{DeckError, Result};

/// Boolean operations a boundary-representation kernel provides.
pub trait Solid: Sized {
    /// The region inside both.
    fn intersection(self, other: Self) -> Self;
    /// The region inside either.
    fn union(self, other: Self) -> Self;
    /// Everything outside this region.
    fn complement(self) -> Self;
}

impl GeometryNode {
    /// Fold this expression into a solid.
    ///
    /// `surfaces` maps a label to the solid on the positive side of that
    /// surface; a bare number means that half-space and `-N` its complement.
    /// `#N` becomes the complement of cell `N` if `cells` knows it, and the
    /// complement of surface `N` otherwise. An unknown surface is a semantic
    /// error.
    pub fn to_solid<S, F, G>(&self, surfaces: F, cells: G) -> Result<S>
    where
        S: Solid,
        F: Fn(&Label) -> Option<S>,
        G: Fn(&Label) -> Option<S>,
    {
        fold(self, &surfaces, &cells)
    }
}

fn fold<S, F, G>(node: &GeometryNode, surfaces: &F, cells: &G) -> Result<S>
where
    S: Solid,
    F: Fn(&Label) -> Option<S>,
    G: Fn(&Label) -> Option<S>,
{
    if let Some(label) = node.cell_complement() {
        if let Some(cell) = cells(label) {
            return Ok(cell.complement());
        }
    }

    match node {
        GeometryNode::Digit(label) => {
            surfaces(label).ok_or_else(|| DeckError::unknown_surface(label.to_string()))
        }
        GeometryNode::Unary(UnaryOp::Plus, operand) => fold(operand, surfaces, cells),
        GeometryNode::Unary(UnaryOp::Minus | UnaryOp::Complement, operand) => {
            Ok(fold(operand, surfaces, cells)?.complement())
        }
        GeometryNode::Paren(inner) => fold(inner, surfaces, cells),
        GeometryNode::Intersection(left, right) => {
            let left = fold(left, surfaces, cells)?;
            Ok(left.intersection(fold(right, surfaces, cells)?))
        }
        GeometryNode::Union(left, right) => {
            let left = fold(left, surfaces, cells)?;
            Ok(left.union(fold(right, surfaces, cells)?))
        }
    }
}

/// A symbolic constructive-solid-geometry tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Csg {
    /// A named primitive: a half-space or a whole cell
    Primitive(String),
    /// Intersection
    And(Box<Csg>, Box<Csg>),
    /// Union
    Or(Box<Csg>, Box<Csg>),
    /// Complement
    Not(Box<Csg>),
}

impl Csg {
    /// A named primitive.
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }
}

impl Solid for Csg {
    fn intersection(self, other: Self) -> Self {
        Csg::And(Box::new(self), Box::new(other))
    }

    fn union(self, other: Self) -> Self {
        Csg::Or(Box::new(self), Box::new(other))
    }

    fn complement(self) -> Self {
        Csg::Not(Box::new(self))
    }
}

impl fmt::Display for Csg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Csg::Primitive(name) => f.write_str(name),
            Csg::And(a, b) => write!(f, "({} & {})", a, b),
            Csg::Or(a, b) => write!(f, "({} | {})", a, b),
            Csg::Not(a) => write!(f, "!{}", a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::rc::Rc;

    fn surface(label: &Label) -> Option<Csg> {
        (label.number() < 100).then(|| Csg::primitive(format!("s{}", label)))
    }

    fn no_cells(_: &Label) -> Option<Csg> {
        None
    }

    fn fold_text(text: &str) -> Result<Csg> {
        text.parse::<GeometryNode>()?.to_solid(surface, no_cells)
    }

    #[test]
    fn test_fold_structure() {
        assert_eq!(fold_text("-1 2:3").unwrap().to_string(), "((!s1 & s2) | s3)");
        assert_eq!(fold_text("+1").unwrap().to_string(), "s1");
        assert_eq!(fold_text("#(1:2)").unwrap().to_string(), "!(s1 | s2)");
        assert_eq!(fold_text("(1)").unwrap().to_string(), "s1");
        assert_eq!(fold_text("-4.2").unwrap().to_string(), "!s4.2");
    }

    #[test]
    fn test_cell_complement_prefers_cells() {
        let cells: HashMap<Label, Csg> =
            HashMap::from([(Label::new(7), Csg::primitive("cell7"))]);
        let node: GeometryNode = "-1 #7 #8".parse().unwrap();
        let solid = node
            .to_solid(surface, |label| cells.get(label).cloned())
            .unwrap();
        assert_eq!(solid.to_string(), "((!s1 & !cell7) & !s8)");
    }

    #[test]
    fn test_unknown_surface_is_semantic() {
        let err = fold_text("1 -150").unwrap_err();
        assert!(err.is_semantic());
        assert!(err.to_string().contains("150"));
    }

    /// Point-membership solid for checking senses against real geometry.
    #[derive(Clone)]
    struct Region(Rc<dyn Fn([f64; 3]) -> bool>);

    impl Region {
        fn contains(&self, p: [f64; 3]) -> bool {
            (self.0)(p)
        }
    }

    impl Solid for Region {
        fn intersection(self, other: Self) -> Self {
            Region(Rc::new(move |p| self.contains(p) && other.contains(p)))
        }

        fn union(self, other: Self) -> Self {
            Region(Rc::new(move |p| self.contains(p) || other.contains(p)))
        }

        fn complement(self) -> Self {
            Region(Rc::new(move |p| !self.contains(p)))
        }
    }

    #[test]
    fn test_senses_against_points() {
        // 1: sphere of radius 2 at the origin, 2: plane z = 0
        let surfaces = |label: &Label| -> Option<Region> {
            match label.number() {
                1 => Some(Region(Rc::new(|p: [f64; 3]| {
                    p[0] * p[0] + p[1] * p[1] + p[2] * p[2] > 4.0
                }))),
                2 => Some(Region(Rc::new(|p: [f64; 3]| p[2] > 0.0))),
                _ => None,
            }
        };
        let upper_half_ball: GeometryNode = "-1 2".parse().unwrap();
        let region = upper_half_ball.to_solid(surfaces, |_| None).unwrap();
        assert!(region.contains([0.0, 0.0, 1.0]));
        assert!(!region.contains([0.0, 0.0, -1.0]));
        assert!(!region.contains([0.0, 0.0, 3.0]));

        let outside: GeometryNode = "#(-1 2)".parse().unwrap();
        let region = outside.to_solid(surfaces, |_| None).unwrap();
        assert!(region.contains([0.0, 0.0, -1.0]));
        assert!(!region.contains([0.5, 0.5, 0.5]));
    }
}
