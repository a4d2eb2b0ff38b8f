extern crate nalgebra as na;

pub mod point;

use na::{DMatrix, DVector, Matrix3, Vector3};
use crate::{EpipolarError, Float, Result};
use self::point::Point;

pub type Point2D = Point<Float>;
pub type HomogeneousPoint = Vector3<Float>;

pub fn to_homogeneous(point: &Point2D) -> HomogeneousPoint {
    Vector3::new(point.x, point.y, 1.0)
}

/**
 * Line a*x + b*y + c = 0 in image coordinates.
 */
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct EpipolarLine {
    pub a: Float,
    pub b: Float,
    pub c: Float
}

impl EpipolarLine {
    pub fn new(a: Float, b: Float, c: Float) -> EpipolarLine {
        EpipolarLine{a,b,c}
    }

    pub fn from_vector(coefficients: &Vector3<Float>) -> EpipolarLine {
        EpipolarLine::new(coefficients[0], coefficients[1], coefficients[2])
    }

    pub fn to_vector(&self) -> Vector3<Float> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Signed residual of the line equation at (x,y).
    pub fn evaluate(&self, x: Float, y: Float) -> Float {
        self.a*x + self.b*y + self.c
    }
}

/**
 * Fixed stereo bifocal tensor. The transpose is cached since the left image line needs it for every match.
 */
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct FundamentalMatrix {
    matrix: Matrix3<Float>,
    transpose: Matrix3<Float>
}

impl FundamentalMatrix {
    pub fn new(matrix: Matrix3<Float>) -> FundamentalMatrix {
        FundamentalMatrix{matrix, transpose: matrix.transpose()}
    }

    pub fn from_rows(rows: &[Vec<Float>]) -> Result<FundamentalMatrix> {
        Ok(FundamentalMatrix::new(matrix3_from_rows(rows)?))
    }

    pub fn from_dmatrix(matrix: &DMatrix<Float>) -> Result<FundamentalMatrix> {
        check_square_3(matrix)?;
        Ok(FundamentalMatrix::new(matrix.fixed_view::<3,3>(0,0).into_owned()))
    }

    pub fn matrix(&self) -> &Matrix3<Float> {&self.matrix}
    pub fn transpose(&self) -> &Matrix3<Float> {&self.transpose}
}

pub fn matrix3_from_rows(rows: &[Vec<Float>]) -> Result<Matrix3<Float>> {
    if rows.len() != 3 || rows.iter().any(|r| r.len() != 3) {
        return Err(EpipolarError::InvalidInput(format!(
            "expected 3x3 matrix, got {} rows with lengths {:?}", rows.len(), rows.iter().map(|r| r.len()).collect::<Vec<usize>>())));
    }
    Ok(Matrix3::from_fn(|r,c| rows[r][c]))
}

fn check_square_3(matrix: &DMatrix<Float>) -> Result<()> {
    match matrix.shape() {
        (3,3) => Ok(()),
        (r,c) => Err(EpipolarError::InvalidInput(format!("expected 3x3 matrix, got {}x{}",r,c)))
    }
}

/**
 * line = matrix * point. Directionality is up to the caller, see line_in_left_image and line_in_right_image.
 */
pub fn compute_epipolar_line(matrix: &Matrix3<Float>, point: &HomogeneousPoint) -> EpipolarLine {
    EpipolarLine::from_vector(&(matrix*point))
}

/**
 * Same as compute_epipolar_line for matrices whose shape is only known at runtime.
 */
pub fn compute_epipolar_line_dyn(matrix: &DMatrix<Float>, point: &DVector<Float>) -> Result<EpipolarLine> {
    check_square_3(matrix)?;
    if point.len() != 3 {
        return Err(EpipolarError::InvalidInput(format!("expected homogeneous point of length 3, got {}", point.len())));
    }
    let line = matrix*point;
    Ok(EpipolarLine::new(line[0], line[1], line[2]))
}

/// Epipolar line in the left image of a point observed in the right image (uses F^T).
pub fn line_in_left_image(fundamental: &FundamentalMatrix, right_point: &Point2D) -> EpipolarLine {
    compute_epipolar_line(fundamental.transpose(), &to_homogeneous(right_point))
}

/// Epipolar line in the right image of a point observed in the left image (uses F).
pub fn line_in_right_image(fundamental: &FundamentalMatrix, left_point: &Point2D) -> EpipolarLine {
    compute_epipolar_line(fundamental.matrix(), &to_homogeneous(left_point))
}
