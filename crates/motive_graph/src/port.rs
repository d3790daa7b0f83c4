// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use crate::target::TargetId;
use serde::{Deserialize, Serialize};

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// Data type that can flow through ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    /// Floating point value
    Number,
    /// Boolean value
    Bool,
    /// 3D vector
    Vector3,
    /// Reference to an externally-owned target object
    ObjectRef,
}

impl ValueType {
    /// Check whether a value of this type may drive an input of `other`.
    ///
    /// Compatibility is decided purely from the conversion table in
    /// [`coerce`]; there are no ad hoc cases.
    pub fn can_convert_to(self, other: ValueType) -> bool {
        coerce(&Value::neutral(self), other).is_some()
    }
}

/// Value that can be stored in a port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Floating point value
    Number(f32),
    /// Boolean value
    Bool(bool),
    /// 3D vector
    Vector3([f32; 3]),
    /// Reference to a target object, possibly unbound
    ObjectRef(Option<TargetId>),
}

impl Value {
    /// Get the value type for this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Number(_) => ValueType::Number,
            Self::Bool(_) => ValueType::Bool,
            Self::Vector3(_) => ValueType::Vector3,
            Self::ObjectRef(_) => ValueType::ObjectRef,
        }
    }

    /// The neutral value for a type: 0 / false / zero vector / unbound
    pub fn neutral(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Number => Self::Number(0.0),
            ValueType::Bool => Self::Bool(false),
            ValueType::Vector3 => Self::Vector3([0.0, 0.0, 0.0]),
            ValueType::ObjectRef => Self::ObjectRef(None),
        }
    }

    /// Read this value as a number, if its type allows it
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Vector3(v) => Some(v[0]),
            _ => None,
        }
    }

    /// Read this value as a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Convert `value` to `target` type using the enumerated implicit
/// conversion table.
///
/// Allowed conversions: identical types, `Vector3 -> Number` (x
/// component), `Number -> Vector3` (splat). Everything else is `None`.
pub fn coerce(value: &Value, target: ValueType) -> Option<Value> {
    if value.value_type() == target {
        return Some(value.clone());
    }
    match (value, target) {
        (Value::Vector3(v), ValueType::Number) => Some(Value::Number(v[0])),
        (Value::Number(n), ValueType::Vector3) => Some(Value::Vector3([*n, *n, *n])),
        _ => None,
    }
}

/// A port on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Port name, unique within the owning node and direction
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Data type
    pub value_type: ValueType,
    /// Default value (for inputs), used while unconnected
    pub default: Option<Value>,
    /// Current value
    pub value: Value,
}

impl Port {
    /// Create a new input port with a default value
    pub fn input(name: impl Into<String>, value_type: ValueType, default: Value) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Input,
            value_type,
            value: default.clone(),
            default: Some(default),
        }
    }

    /// Create a new input port with no default; reads fall back to the
    /// type's neutral value
    pub fn input_neutral(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Input,
            value_type,
            default: None,
            value: Value::neutral(value_type),
        }
    }

    /// Create a new output port
    pub fn output(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Output,
            value_type,
            default: None,
            value: Value::neutral(value_type),
        }
    }

    /// The value an unconnected read of this port yields: the default
    /// if one was declared, else the type's neutral
    pub fn resting_value(&self) -> Value {
        self.default
            .clone()
            .unwrap_or_else(|| Value::neutral(self.value_type))
    }

    /// Check if this output port can drive `input`
    pub fn can_connect(&self, input: &Port) -> bool {
        self.direction == PortDirection::Output
            && input.direction == PortDirection::Input
            && self.value_type.can_convert_to(input.value_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_types_convert() {
        for t in [
            ValueType::Number,
            ValueType::Bool,
            ValueType::Vector3,
            ValueType::ObjectRef,
        ] {
            assert!(t.can_convert_to(t));
        }
    }

    #[test]
    fn vector_number_conversions() {
        assert_eq!(
            coerce(&Value::Vector3([3.0, 4.0, 5.0]), ValueType::Number),
            Some(Value::Number(3.0))
        );
        assert_eq!(
            coerce(&Value::Number(2.0), ValueType::Vector3),
            Some(Value::Vector3([2.0, 2.0, 2.0]))
        );
    }

    #[test]
    fn disallowed_conversions() {
        assert_eq!(coerce(&Value::Bool(true), ValueType::Number), None);
        assert_eq!(coerce(&Value::Number(1.0), ValueType::Bool), None);
        assert_eq!(coerce(&Value::ObjectRef(None), ValueType::Number), None);
        assert!(!ValueType::Bool.can_convert_to(ValueType::Vector3));
    }

    #[test]
    fn resting_value_prefers_default() {
        let with_default = Port::input("Opacity", ValueType::Number, Value::Number(1.0));
        assert_eq!(with_default.resting_value(), Value::Number(1.0));

        let bare = Port::input_neutral("Alpha", ValueType::Number);
        assert_eq!(bare.resting_value(), Value::Number(0.0));
    }

    #[test]
    fn direction_checked_on_connect() {
        let out = Port::output("Rotation", ValueType::Number);
        let inp = Port::input("Z", ValueType::Number, Value::Number(0.0));
        assert!(out.can_connect(&inp));
        assert!(!inp.can_connect(&out));
        assert!(!out.can_connect(&out));
    }
}
