use serde::{Serialize, Deserialize};

#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct Point<T> where T: PartialOrd + PartialEq {
    pub x: T,
    pub y: T
}

impl<T> PartialEq for Point<T> where T: PartialOrd {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y== other.y
    }
}

impl<T> Point<T> where T: PartialOrd + PartialEq {
    pub fn new(x: T, y:T) -> Point<T> {
        Point{x,y}
    }
}
