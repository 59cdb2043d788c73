//! Derived (record) types and their two-phase construction.
//!
//! `declare_record` interns a record by name with no layout. Other types may
//! wrap the declared handle right away, which is how self- and mutually
//! recursive derived types are built. `finalize_record` later attaches the
//! length parameters and components to the same slot.
//!
//! Finalizing an already-finalized record with an identical layout is a
//! no-op; any different layout is rejected.

use tracing::debug;

use super::construct::violation;
use crate::cursor::is_identifier;
use crate::names::Name;
use crate::{Idx, InvariantViolation, Item, Pool, Tag};

/// One `(name, type)` entry of a record layout.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Component {
    pub name: Name,
    pub ty: Idx,
}

/// Mutable payload of a record slot.
pub(super) struct RecordData {
    name: Name,
    finalized: bool,
    len_params: Vec<Component>,
    components: Vec<Component>,
}

impl Pool {
    /// Get the record named `name`, declaring it if needed.
    ///
    /// Idempotent: the same name always yields the same handle, declared or
    /// finalized.
    pub fn declare_record(&mut self, name: &str) -> Result<Idx, InvariantViolation> {
        if let Some(idx) = self.record_by_name(name) {
            return Ok(idx);
        }
        if !is_identifier(name) {
            return Err(violation(
                Tag::Record,
                format!("`{name}` is not a valid type name"),
            ));
        }

        let name = self.names.intern(name);
        let slot = u32::try_from(self.records.len())
            .unwrap_or_else(|_| panic!("type pool exceeded u32::MAX records"));
        self.records.push(RecordData {
            name,
            finalized: false,
            len_params: Vec::new(),
            components: Vec::new(),
        });
        let idx = self.push(Item::new(Tag::Record, slot), &[]);
        self.records_by_name.insert(name, idx);
        Ok(idx)
    }

    /// Look up a record by name without declaring it.
    pub fn record_by_name(&self, name: &str) -> Option<Idx> {
        let name = self.names.get(name)?;
        self.records_by_name.get(&name).copied()
    }

    /// Attach a layout to a declared record.
    ///
    /// Length parameters must have intrinsic integer type. Names must be
    /// unique across both lists.
    pub fn finalize_record(
        &mut self,
        record: Idx,
        len_params: &[(&str, Idx)],
        components: &[(&str, Idx)],
    ) -> Result<(), InvariantViolation> {
        let slot = self
            .record_slot(record)
            .ok_or_else(|| violation(Tag::Record, format!("{record:?} is not a record type")))?;
        self.verify_layout(len_params, components)?;

        let data = &self.records[slot];
        if data.finalized {
            let same = self.same_layout(&data.len_params, len_params)
                && self.same_layout(&data.components, components);
            let name = self.names.lookup(data.name);
            if same {
                debug!(record = name, "record already finalized with identical layout");
                return Ok(());
            }
            return Err(violation(
                Tag::Record,
                format!("`{name}` is already finalized with a different layout"),
            ));
        }

        let len_params: Vec<Component> = len_params
            .iter()
            .map(|&(name, ty)| Component {
                name: self.names.intern(name),
                ty,
            })
            .collect();
        let components: Vec<Component> = components
            .iter()
            .map(|&(name, ty)| Component {
                name: self.names.intern(name),
                ty,
            })
            .collect();

        let data = &mut self.records[slot];
        data.len_params = len_params;
        data.components = components;
        data.finalized = true;
        debug!(
            record = self.names.lookup(data.name),
            len_params = data.len_params.len(),
            components = data.components.len(),
            "finalized record"
        );
        Ok(())
    }

    fn verify_layout(
        &self,
        len_params: &[(&str, Idx)],
        components: &[(&str, Idx)],
    ) -> Result<(), InvariantViolation> {
        let all = len_params.iter().chain(components);
        for (i, &(name, ty)) in all.clone().enumerate() {
            if !is_identifier(name) {
                return Err(violation(
                    Tag::Record,
                    format!("`{name}` is not a valid component name"),
                ));
            }
            if all.clone().take(i).any(|&(earlier, _)| earlier == name) {
                return Err(violation(
                    Tag::Record,
                    format!("`{name}` is declared more than once"),
                ));
            }
            self.check_live(Tag::Record, ty)?;
        }
        if let Some(&(name, ty)) = len_params
            .iter()
            .find(|&&(_, ty)| self.tag(ty) != Tag::Integer)
        {
            return Err(violation(
                Tag::Record,
                format!(
                    "length parameter `{name}` has type `{}`, expected `int`",
                    self.tag(ty)
                ),
            ));
        }
        Ok(())
    }

    fn same_layout(&self, existing: &[Component], incoming: &[(&str, Idx)]) -> bool {
        existing.len() == incoming.len()
            && existing
                .iter()
                .zip(incoming)
                .all(|(have, &(name, ty))| have.ty == ty && self.names.lookup(have.name) == name)
    }

    fn record_slot(&self, idx: Idx) -> Option<usize> {
        (self.contains(idx) && self.tag(idx) == Tag::Record).then(|| self.data(idx) as usize)
    }

    fn record_data(&self, idx: Idx) -> Option<&RecordData> {
        self.record_slot(idx).map(|slot| &self.records[slot])
    }

    // === Queries ===
    // Declared records answer with empty layouts, never an error.

    /// Check if `record` has a layout attached.
    pub fn is_finalized(&self, record: Idx) -> bool {
        self.record_data(record).is_some_and(|data| data.finalized)
    }

    pub fn record_name(&self, record: Idx) -> Option<&str> {
        self.record_data(record)
            .map(|data| self.names.lookup(data.name))
    }

    /// Data components in declaration order.
    pub fn record_components(&self, record: Idx) -> &[Component] {
        self.record_data(record)
            .map(|data| data.components.as_slice())
            .unwrap_or_default()
    }

    /// Length parameters in declaration order.
    pub fn record_len_params(&self, record: Idx) -> &[Component] {
        self.record_data(record)
            .map(|data| data.len_params.as_slice())
            .unwrap_or_default()
    }

    /// Type of the component called `name`.
    pub fn field_type(&self, record: Idx, name: &str) -> Option<Idx> {
        lookup_component(self, self.record_components(record), name)
    }

    /// Type of the component at `index`.
    pub fn field_type_at(&self, record: Idx, index: usize) -> Option<Idx> {
        self.record_components(record).get(index).map(|c| c.ty)
    }

    /// Type of the length parameter called `name`.
    pub fn len_param_type(&self, record: Idx, name: &str) -> Option<Idx> {
        lookup_component(self, self.record_len_params(record), name)
    }

    pub fn field_count(&self, record: Idx) -> usize {
        self.record_components(record).len()
    }

    pub fn len_param_count(&self, record: Idx) -> usize {
        self.record_len_params(record).len()
    }
}

fn lookup_component(pool: &Pool, list: &[Component], name: &str) -> Option<Idx> {
    let name = pool.names.get(name)?;
    list.iter().find(|c| c.name == name).map(|c| c.ty)
}
