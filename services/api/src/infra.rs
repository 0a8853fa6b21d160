use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

use gramjal::surveillance::villages::{
    DispatchError, NotificationDispatch, NotificationGateway, RepositoryError, Village, VillageId,
    VillageRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Bundled demo registry matching the field pilot dataset; used when no
/// APP_REGISTRY file is configured.
pub(crate) const DEMO_REGISTRY_CSV: &str = "\
Village ID,Name,Population,ASHA Worker,Water Sources,Water Quality,pH,Turbidity NTU,Coliform CFU,Chlorine mg/L,Diarrhea,Cholera,Typhoid,Hepatitis,Updated On
village-1,Rampur,2500,Priya Sharma,Borewell; Hand Pump,Good,7.2,1.5,0,0.5,2,0,1,0,2024-01-15
village-2,Krishnanagar,1800,Sunita Devi,Well; Pond,Fair,6.8,3.2,2,0.2,5,1,2,0,2024-01-14
village-3,Govindpur,3200,Meera Patel,River; Hand Pump,Poor,6.2,5.8,8,0.1,8,2,3,1,2024-01-13
";

#[derive(Default, Clone)]
pub(crate) struct InMemoryVillageRepository {
    villages: Arc<Mutex<BTreeMap<VillageId, Village>>>,
}

impl InMemoryVillageRepository {
    pub(crate) fn seed(&self, villages: Vec<Village>) {
        let mut guard = self.villages.lock().expect("repository mutex poisoned");
        for village in villages {
            guard.insert(village.id.clone(), village);
        }
    }
}

impl VillageRepository for InMemoryVillageRepository {
    fn insert(&self, village: Village) -> Result<Village, RepositoryError> {
        let mut guard = self.villages.lock().expect("repository mutex poisoned");
        if guard.contains_key(&village.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(village.id.clone(), village.clone());
        Ok(village)
    }

    fn update(&self, village: Village) -> Result<(), RepositoryError> {
        let mut guard = self.villages.lock().expect("repository mutex poisoned");
        if guard.contains_key(&village.id) {
            guard.insert(village.id.clone(), village);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &VillageId) -> Result<Option<Village>, RepositoryError> {
        let guard = self.villages.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Village>, RepositoryError> {
        let guard = self.villages.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Gateway stub that records dispatches and logs them; a real SMS/push
/// transport plugs in behind the same trait.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotificationGateway {
    dispatches: Arc<Mutex<Vec<NotificationDispatch>>>,
}

impl LoggingNotificationGateway {
    #[cfg(test)]
    pub(crate) fn dispatches(&self) -> Vec<NotificationDispatch> {
        self.dispatches
            .lock()
            .expect("gateway mutex poisoned")
            .clone()
    }
}

impl NotificationGateway for LoggingNotificationGateway {
    fn dispatch(&self, dispatch: NotificationDispatch) -> Result<(), DispatchError> {
        info!(
            village = %dispatch.village_id.0,
            channel = dispatch.channel.label(),
            recipients = dispatch.recipients,
            "notification dispatched (no transport configured)"
        );
        self.dispatches
            .lock()
            .expect("gateway mutex poisoned")
            .push(dispatch);
        Ok(())
    }
}
