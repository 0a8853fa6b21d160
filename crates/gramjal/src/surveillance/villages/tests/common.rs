use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::surveillance::villages::domain::{
    Actor, MeasurementSet, Village, VillageId, WaterQualityLabel, WaterReadings,
};
use crate::surveillance::villages::repository::{
    DispatchError, NotificationDispatch, NotificationGateway, RepositoryError, VillageRepository,
};
use crate::surveillance::villages::risk::RiskConfig;
use crate::surveillance::villages::router::village_router;
use crate::surveillance::villages::service::SurveillanceService;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date")
}

pub(super) fn admin() -> Actor {
    Actor::administrator()
}

pub(super) fn field_worker(village: &str) -> Actor {
    Actor::field_worker(VillageId(village.to_string()))
}

pub(super) fn viewer() -> Actor {
    Actor::viewer()
}

pub(super) fn measurements(
    ph: f64,
    turbidity_ntu: f64,
    coliform_cfu: u32,
    chlorine_mg_l: f64,
    cases: &[(&str, u32)],
) -> MeasurementSet {
    MeasurementSet {
        water: WaterReadings {
            ph,
            turbidity_ntu,
            coliform_cfu,
            chlorine_mg_l,
        },
        cases: cases
            .iter()
            .map(|(disease, count)| (disease.to_string(), *count))
            .collect(),
    }
}

fn village(
    id: &str,
    name: &str,
    population: u32,
    asha_worker: &str,
    water_quality: WaterQualityLabel,
    readings: MeasurementSet,
) -> Village {
    Village {
        id: VillageId(id.to_string()),
        name: name.to_string(),
        population,
        asha_worker: asha_worker.to_string(),
        water_sources: vec!["Borewell".to_string(), "Hand Pump".to_string()],
        water_quality,
        measurements: readings,
        last_updated: today(),
    }
}

pub(super) fn rampur() -> Village {
    village(
        "village-1",
        "Rampur",
        2500,
        "Priya Sharma",
        WaterQualityLabel::Good,
        measurements(
            7.2,
            1.5,
            0,
            0.5,
            &[("diarrhea", 2), ("cholera", 0), ("typhoid", 1), ("hepatitis", 0)],
        ),
    )
}

pub(super) fn krishnanagar() -> Village {
    village(
        "village-2",
        "Krishnanagar",
        1800,
        "Sunita Devi",
        WaterQualityLabel::Fair,
        measurements(
            6.8,
            3.2,
            2,
            0.2,
            &[("diarrhea", 5), ("cholera", 1), ("typhoid", 2), ("hepatitis", 0)],
        ),
    )
}

pub(super) fn govindpur() -> Village {
    village(
        "village-3",
        "Govindpur",
        3200,
        "Meera Patel",
        WaterQualityLabel::Poor,
        measurements(
            6.2,
            5.8,
            8,
            0.1,
            &[("diarrhea", 8), ("cholera", 2), ("typhoid", 3), ("hepatitis", 1)],
        ),
    )
}

pub(super) fn build_service() -> (
    SurveillanceService<MemoryRepository, MemoryGateway>,
    Arc<MemoryRepository>,
    Arc<MemoryGateway>,
) {
    let repository = Arc::new(MemoryRepository::default());
    for seed in [rampur(), krishnanagar(), govindpur()] {
        repository.insert(seed).expect("seed inserts");
    }

    let gateway = Arc::new(MemoryGateway::default());
    let service =
        SurveillanceService::new(repository.clone(), gateway.clone(), RiskConfig::default());
    (service, repository, gateway)
}

pub(super) fn router_with_service(
    service: SurveillanceService<MemoryRepository, MemoryGateway>,
) -> axum::Router {
    village_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    villages: Arc<Mutex<BTreeMap<VillageId, Village>>>,
}

impl VillageRepository for MemoryRepository {
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

#[derive(Default, Clone)]
pub(super) struct MemoryGateway {
    dispatches: Arc<Mutex<Vec<NotificationDispatch>>>,
}

impl MemoryGateway {
    pub(super) fn dispatches(&self) -> Vec<NotificationDispatch> {
        self.dispatches
            .lock()
            .expect("gateway mutex poisoned")
            .clone()
    }
}

impl NotificationGateway for MemoryGateway {
    fn dispatch(&self, dispatch: NotificationDispatch) -> Result<(), DispatchError> {
        self.dispatches
            .lock()
            .expect("gateway mutex poisoned")
            .push(dispatch);
        Ok(())
    }
}

pub(super) struct UnavailableGateway;

impl NotificationGateway for UnavailableGateway {
    fn dispatch(&self, _dispatch: NotificationDispatch) -> Result<(), DispatchError> {
        Err(DispatchError::Transport("sms gateway offline".to_string()))
    }
}
