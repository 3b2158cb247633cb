//! Shared component types for storage tests.

use bento_foundation::Component;

#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}
impl Component for Position {}

#[derive(Clone, Debug, PartialEq)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}
impl Component for Velocity {}

#[derive(Clone, Debug, PartialEq)]
pub struct Name(pub String);
impl Component for Name {}

#[derive(Clone, Debug, PartialEq)]
pub struct A(pub u32);
impl Component for A {}

#[derive(Clone, Debug, PartialEq)]
pub struct B(pub u32);
impl Component for B {}

pub fn pos(x: i32, y: i32) -> Position {
    Position { x, y }
}

pub fn vel(dx: i32, dy: i32) -> Velocity {
    Velocity { dx, dy }
}
