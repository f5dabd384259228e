//! Per-clause binding lists.
//!
//! Placeholders are emitted clause by clause in [`BindingKind::ORDER`], so the
//! flattened binding sequence is the concatenation of the lists in that
//! order.

use crate::value::Value;

/// Clause category a binding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Select,
    From,
    Join,
    Where,
    Having,
    Order,
    Union,
    UnionOrder,
}

impl BindingKind {
    /// Fixed flattening order; matches the order clauses are rendered.
    pub const ORDER: [BindingKind; 8] = [
        BindingKind::Select,
        BindingKind::From,
        BindingKind::Join,
        BindingKind::Where,
        BindingKind::Having,
        BindingKind::Order,
        BindingKind::Union,
        BindingKind::UnionOrder,
    ];
}

/// Ordered binding lists, one per [`BindingKind`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    select: Vec<Value>,
    from: Vec<Value>,
    join: Vec<Value>,
    where_: Vec<Value>,
    having: Vec<Value>,
    order: Vec<Value>,
    union: Vec<Value>,
    union_order: Vec<Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: BindingKind) -> &[Value] {
        match kind {
            BindingKind::Select => &self.select,
            BindingKind::From => &self.from,
            BindingKind::Join => &self.join,
            BindingKind::Where => &self.where_,
            BindingKind::Having => &self.having,
            BindingKind::Order => &self.order,
            BindingKind::Union => &self.union,
            BindingKind::UnionOrder => &self.union_order,
        }
    }

    fn get_mut(&mut self, kind: BindingKind) -> &mut Vec<Value> {
        match kind {
            BindingKind::Select => &mut self.select,
            BindingKind::From => &mut self.from,
            BindingKind::Join => &mut self.join,
            BindingKind::Where => &mut self.where_,
            BindingKind::Having => &mut self.having,
            BindingKind::Order => &mut self.order,
            BindingKind::Union => &mut self.union,
            BindingKind::UnionOrder => &mut self.union_order,
        }
    }

    /// Append values to one category. Raw expressions are skipped: they are
    /// rendered inline and own no placeholder.
    pub fn extend(&mut self, kind: BindingKind, values: impl IntoIterator<Item = Value>) {
        self.get_mut(kind)
            .extend(values.into_iter().filter(|v| !v.is_raw()));
    }

    pub fn push(&mut self, kind: BindingKind, value: Value) {
        self.extend(kind, std::iter::once(value));
    }

    /// Replace one category.
    pub fn set(&mut self, kind: BindingKind, values: Vec<Value>) {
        *self.get_mut(kind) = Vec::new();
        self.extend(kind, values);
    }

    /// Append every category of `other` to the matching category here.
    pub fn merge(&mut self, other: &Bindings) {
        for kind in BindingKind::ORDER {
            self.extend(kind, other.get(kind).iter().cloned());
        }
    }

    /// All bindings in [`BindingKind::ORDER`].
    pub fn flatten(&self) -> Vec<Value> {
        BindingKind::ORDER
            .iter()
            .flat_map(|kind| self.get(*kind).iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        BindingKind::ORDER.iter().map(|kind| self.get(*kind).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::raw;

    #[test]
    fn test_flatten_follows_fixed_order() {
        let mut b = Bindings::new();
        b.push(BindingKind::UnionOrder, Value::Int(8));
        b.push(BindingKind::Where, Value::Int(4));
        b.push(BindingKind::Select, Value::Int(1));
        b.push(BindingKind::Join, Value::Int(3));
        b.push(BindingKind::Union, Value::Int(7));
        b.push(BindingKind::Having, Value::Int(5));
        assert_eq!(
            b.flatten(),
            vec![
                Value::Int(1),
                Value::Int(3),
                Value::Int(4),
                Value::Int(5),
                Value::Int(7),
                Value::Int(8)
            ]
        );
    }

    #[test]
    fn test_raw_values_are_not_bound() {
        let mut b = Bindings::new();
        b.extend(BindingKind::Where, vec![Value::Int(1), Value::Raw(raw("NOW()"))]);
        assert_eq!(b.get(BindingKind::Where), &[Value::Int(1)]);
    }

    #[test]
    fn test_merge_appends_per_category() {
        let mut a = Bindings::new();
        a.push(BindingKind::Where, Value::Int(1));
        let mut b = Bindings::new();
        b.push(BindingKind::Select, Value::Int(0));
        b.push(BindingKind::Where, Value::Int(2));
        a.merge(&b);
        assert_eq!(a.get(BindingKind::Where), &[Value::Int(1), Value::Int(2)]);
        assert_eq!(a.flatten(), vec![Value::Int(0), Value::Int(1), Value::Int(2)]);
    }
}
