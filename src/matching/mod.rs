use serde::{Serialize, Deserialize};

use crate::features::KeyPoint;
use crate::pipeline::Correspondence;
use crate::Result;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct Match {
    pub left_index: usize,
    pub right_index: usize,
    pub distance: u32
}

fn nearest(a: &KeyPoint, bs: &[KeyPoint]) -> Result<Option<(usize,u32)>> {
    let mut best: Option<(usize,u32)> = None;
    for (index, b) in bs.iter().enumerate() {
        let distance = a.descriptor.hamming_distance(&b.descriptor)?;
        best = match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((index, distance))
        };
    }
    Ok(best)
}

/**
 * Brute force hamming matching with cross check: (i,j) is kept only if j is the nearest
 * neighbour of i and i is the nearest neighbour of j. Sorted by ascending distance.
 */
pub fn match_cross_checked(left: &[KeyPoint], right: &[KeyPoint]) -> Result<Vec<Match>> {
    let nearest_left_of_right = right.iter().map(|r| nearest(r, left)).collect::<Result<Vec<Option<(usize,u32)>>>>()?;

    let mut matches = Vec::<Match>::new();
    for (left_index, l) in left.iter().enumerate() {
        if let Some((right_index, distance)) = nearest(l, right)? {
            if let Some((back_index, _)) = nearest_left_of_right[right_index] {
                if back_index == left_index {
                    matches.push(Match{left_index, right_index, distance});
                }
            }
        }
    }

    // stable, so equal distances keep left index order
    matches.sort_by_key(|m| m.distance);
    Ok(matches)
}

/// Panics if a match indexes outside left / right; pass the keypoint sets the matches were computed from.
pub fn correspondences(matches: &[Match], left: &[KeyPoint], right: &[KeyPoint]) -> Vec<Correspondence> {
    matches.iter().map(|m| Correspondence::new(left[m.left_index].location, right[m.right_index].location)).collect()
}
