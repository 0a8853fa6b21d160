use super::domain::{Actor, Role, VillageId};

/// Malformed actor data detected at the policy boundary.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("field worker actor is missing a village assignment")]
    MissingAssignment,
    #[error("{role} actor must not carry a village assignment")]
    UnexpectedAssignment { role: &'static str },
}

/// Returns the field worker's assignment, rejecting actors whose role and
/// assignment do not line up.
fn assignment(actor: &Actor) -> Result<Option<&VillageId>, ConfigurationError> {
    match (actor.role, actor.assigned_village.as_ref()) {
        (Role::FieldWorker, Some(village)) => Ok(Some(village)),
        (Role::FieldWorker, None) => Err(ConfigurationError::MissingAssignment),
        (Role::Administrator | Role::Viewer, Some(_)) => {
            Err(ConfigurationError::UnexpectedAssignment {
                role: actor.role.label(),
            })
        }
        (Role::Administrator | Role::Viewer, None) => Ok(None),
    }
}

/// May the actor view the target village? Viewers read everything; field
/// workers only their assignment.
pub fn can_access(actor: &Actor, target: &VillageId) -> Result<bool, ConfigurationError> {
    let assigned = assignment(actor)?;
    Ok(match actor.role {
        Role::Administrator | Role::Viewer => true,
        Role::FieldWorker => assigned == Some(target),
    })
}

/// May the actor record data or compose notifications for the target village?
/// Viewers never; field workers only for their assignment.
pub fn can_edit(actor: &Actor, target: &VillageId) -> Result<bool, ConfigurationError> {
    let assigned = assignment(actor)?;
    Ok(match actor.role {
        Role::Administrator => true,
        Role::FieldWorker => assigned == Some(target),
        Role::Viewer => false,
    })
}

/// Filters a village listing down to what the actor may see. Field workers
/// receive at most their own assignment; an assignment absent from `all`
/// yields an empty listing.
pub fn visible_villages(
    actor: &Actor,
    all: &[VillageId],
) -> Result<Vec<VillageId>, ConfigurationError> {
    let assigned = assignment(actor)?;
    Ok(match actor.role {
        Role::Administrator | Role::Viewer => all.to_vec(),
        Role::FieldWorker => all
            .iter()
            .filter(|id| assigned == Some(*id))
            .cloned()
            .collect(),
    })
}
