//! Turns a synthesis ledger into a humanoid name mapping.

use rigsmith_spec::NameMapping;

use crate::builder::Rig;
use crate::error::{RigError, RigResult};
use crate::ledger::SynthesisLedger;

/// Relabels every ledger entry into a [`NameMapping`].
///
/// No geometry is inspected. A later entry for the same humanoid bone
/// replaces an earlier one.
///
/// # Errors
/// * [`RigError::DanglingReference`] if an entry names a bone the rig lacks
pub fn map_to_schema(rig: &Rig, ledger: &SynthesisLedger) -> RigResult<NameMapping> {
    if let Some(entry) = ledger
        .entries()
        .iter()
        .find(|entry| rig.find(&entry.rig_bone).is_none())
    {
        return Err(RigError::DanglingReference {
            schema_bone: entry.schema_bone.clone(),
            rig_bone: entry.rig_bone.clone(),
        });
    }

    Ok(ledger
        .entries()
        .iter()
        .map(|entry| (entry.schema_bone.as_str(), entry.rig_bone.as_str()))
        .collect())
}
