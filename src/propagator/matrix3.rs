use std::fmt;
use num::complex::Complex;
use num::Zero;

/// A 3x3 complex matrix acting on the state (A_x, A_y, a), i.e. the two
/// transverse photon polarizations and the ALP amplitude.
#[derive(Copy,Clone,PartialEq)]
pub struct Matrix3 {
    pub m: [[Complex<f64>; 3]; 3],
}

impl fmt::Debug for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.m.iter().enumerate() {
            let sep = if i < 2 {"\n"} else {""};
            write!(f, "[{:.6e} {:.6e} {:.6e}]{}", row[0], row[1], row[2], sep)?;
        }
        Ok(())
    }
}

impl std::ops::Index<(usize, usize)> for Matrix3 {
    type Output = Complex<f64>;
    fn index(&self, (i, j): (usize, usize)) -> &Complex<f64> {
        &self.m[i][j]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix3 {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Complex<f64> {
        &mut self.m[i][j]
    }
}

// Add two matrices together
impl std::ops::Add for Matrix3 {
    type Output = Matrix3;
    fn add(self, other: Matrix3) -> Matrix3 {
        let mut out = self;
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] += other.m[i][j];
            }
        }
        out
    }
}

// Matrix product
impl std::ops::Mul for Matrix3 {
    type Output = Matrix3;
    fn mul(self, other: Matrix3) -> Matrix3 {
        let mut out = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        out
    }
}

// Multiply a matrix by a complex scalar
impl std::ops::Mul<Complex<f64>> for Matrix3 {
    type Output = Matrix3;
    fn mul(self, other: Complex<f64>) -> Matrix3 {
        let mut out = self;
        out.m.iter_mut().flatten().for_each(|z| *z *= other);
        out
    }
}

// Multiply a complex scalar by a matrix
impl std::ops::Mul<Matrix3> for Complex<f64> {
    type Output = Matrix3;
    fn mul(self, other: Matrix3) -> Matrix3 {
        other * self
    }
}

impl Matrix3 {
    pub fn zero() -> Matrix3 {
        Matrix3 {m: [[Complex::zero(); 3]; 3]}
    }

    pub fn identity() -> Matrix3 {
        Matrix3::from_real([
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    pub fn from_real(a: [[f64; 3]; 3]) -> Matrix3 {
        let mut out = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = Complex::new(a[i][j], 0.0);
            }
        }
        out
    }

    /// Outer product v vᵀ of a real vector with itself
    pub fn outer(v: [f64; 3]) -> Matrix3 {
        let mut out = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = Complex::new(v[i] * v[j], 0.0);
            }
        }
        out
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> Matrix3 {
        let mut out = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = self.m[j][i].conj();
            }
        }
        out
    }

    pub fn transpose(&self) -> Matrix3 {
        let mut out = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = self.m[j][i];
            }
        }
        out
    }

    pub fn trace(&self) -> Complex<f64> {
        self.m[0][0] + self.m[1][1] + self.m[2][2]
    }

    /// Largest modulus of the elementwise difference between two matrices
    pub fn max_deviation(&self, other: &Matrix3) -> f64 {
        self.m.iter().flatten()
            .zip(other.m.iter().flatten())
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max)
    }

    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|z| z.re.is_finite() && z.im.is_finite())
    }
}
