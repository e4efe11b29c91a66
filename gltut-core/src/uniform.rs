//! Uniform value shapes.
//!
//! The [`Uniform`] trait turns host values into a [`UniformValue`], the closed set of shapes a
//! [`Driver`](crate::Driver) knows how to write.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// A value ready to be written into a uniform slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    /// Column-major, uploaded without transposing.
    Mat4(Mat4),
}

/// Represents a host value that can be stored in a uniform variable.
pub trait Uniform {
    /// Converts the value into the shape written to the driver.
    fn uniform_value(&self) -> UniformValue;
}

impl Uniform for bool {
    fn uniform_value(&self) -> UniformValue {
        UniformValue::Int(*self as i32)
    }
}

impl Uniform for i32 {
    fn uniform_value(&self) -> UniformValue {
        UniformValue::Int(*self)
    }
}

impl Uniform for f32 {
    fn uniform_value(&self) -> UniformValue {
        UniformValue::Float(*self)
    }
}

impl Uniform for Vec2 {
    fn uniform_value(&self) -> UniformValue {
        UniformValue::Vec2(*self)
    }
}

impl Uniform for Vec3 {
    fn uniform_value(&self) -> UniformValue {
        UniformValue::Vec3(*self)
    }
}

impl Uniform for Vec4 {
    fn uniform_value(&self) -> UniformValue {
        UniformValue::Vec4(*self)
    }
}

impl Uniform for Mat4 {
    fn uniform_value(&self) -> UniformValue {
        UniformValue::Mat4(*self)
    }
}

impl Uniform for UniformValue {
    fn uniform_value(&self) -> UniformValue {
        *self
    }
}

impl<T: Uniform> Uniform for &T {
    fn uniform_value(&self) -> UniformValue {
        (*self).uniform_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_is_written_as_int() {
        assert_eq!(true.uniform_value(), UniformValue::Int(1));
        assert_eq!(false.uniform_value(), UniformValue::Int(0));
    }

    #[test]
    fn test_references_forward_to_value() {
        let color = Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!((&color).uniform_value(), UniformValue::Vec4(color));
        assert_eq!((&&2.5f32).uniform_value(), UniformValue::Float(2.5));
    }
}
