// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pure arithmetic nodes.

use crate::node::Node;
use crate::port::Value;

pub(crate) fn compute(node: &mut Node) -> Vec<(&'static str, Value)> {
    let a = node.input_number("A");
    let b = node.input_number("B");
    vec![("Result", Value::Number(a * b))]
}
