// src/store/project_store.rs

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::projects::{
    DailyLog, MaterialApproval, MaterialStatus, Project, ProjectStage, RrtStatus,
};
use crate::store::blob::{BlobStore, JsonCollection};

const PROJECTS_KEY: &str = "projects_v1";

#[derive(Clone)]
pub struct ProjectStore {
    collection: JsonCollection<Project>,
}

impl ProjectStore {
    pub async fn open(blob: BlobStore) -> Self {
        Self {
            collection: JsonCollection::open(blob, PROJECTS_KEY, seed_projects, normalize_project)
                .await,
        }
    }

    pub async fn snapshot(&self) -> Vec<Project> {
        self.collection.snapshot().await
    }

    pub async fn replace_all(&self, projects: Vec<Project>) {
        self.collection.replace_all(projects).await;
    }

    pub async fn find(&self, id: Uuid) -> Option<Project> {
        self.collection
            .snapshot()
            .await
            .into_iter()
            .find(|p| p.id == id)
    }
}

/// Reimpõe os invariantes do contrato sobre registros antigos:
/// progress em [0,100], paid_value saturado em total_value, custos >= 0.
fn normalize_project(project: &mut Project) {
    if project.progress > 100 {
        project.progress = 100;
    }
    if project.paid_value > project.total_value {
        project.paid_value = project.total_value;
    }
    if project.paid_value < Decimal::ZERO {
        project.paid_value = Decimal::ZERO;
    }
    if project.costs < Decimal::ZERO {
        project.costs = Decimal::ZERO;
    }
}

fn seed_projects() -> Vec<Project> {
    let today = Utc::now().date_naive();
    vec![
        Project {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            client_name: "Beatriz L.".into(),
            title: "Apartamento Ipanema".into(),
            stage: ProjectStage::Construction,
            start_date: today - Duration::days(95),
            deadline: today + Duration::days(30),
            total_value: Decimal::new(15_000, 0),
            paid_value: Decimal::new(11_250, 0),
            costs: Decimal::new(4_200, 0),
            progress: 75,
            rrt_status: RrtStatus::Paid,
            rrt_number: Some("RRT-2023-9988".into()),
            daily_logs: vec![
                DailyLog {
                    id: Uuid::new_v4(),
                    date: today - Duration::days(2),
                    content:
                        "Início do assentamento do piso na sala. Material entregue conforme cronograma."
                            .into(),
                    image_url: Some(
                        "https://images.unsplash.com/photo-1581858726788-75bc0f6a952d".into(),
                    ),
                },
                DailyLog {
                    id: Uuid::new_v4(),
                    date: today - Duration::days(1),
                    content:
                        "Finalização da pintura base nos quartos. Aguardando secagem para segunda demão."
                            .into(),
                    image_url: None,
                },
            ],
            material_approvals: vec![
                MaterialApproval {
                    id: Uuid::new_v4(),
                    name: "Mármore Carrara".into(),
                    category: "Bancada Cozinha".into(),
                    status: MaterialStatus::Approved,
                    image_url: "https://images.unsplash.com/photo-1600585152220-90363fe7e115"
                        .into(),
                },
                MaterialApproval {
                    id: Uuid::new_v4(),
                    name: "Porcelanato Cinza".into(),
                    category: "Sala/Quartos".into(),
                    status: MaterialStatus::Pending,
                    image_url: "https://images.unsplash.com/photo-1516455590571-18256e5bb9ff"
                        .into(),
                },
            ],
        },
        Project {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            client_name: "Ricardo M.".into(),
            title: "Casa de Campo - Itatiba".into(),
            stage: ProjectStage::Concept,
            start_date: today - Duration::days(40),
            deadline: today + Duration::days(120),
            total_value: Decimal::new(45_000, 0),
            paid_value: Decimal::new(13_500, 0),
            costs: Decimal::new(6_800, 0),
            progress: 30,
            rrt_status: RrtStatus::Pending,
            rrt_number: None,
            daily_logs: Vec::new(),
            material_approvals: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::blob::tests::temp_store;

    #[tokio::test]
    async fn normalize_clamps_progress_and_paid_value() {
        let blob = temp_store();
        blob.write(
            PROJECTS_KEY,
            r#"[{
                "id": "7f2b1d1e-53a4-4b08-9a53-0cde17640f5a",
                "clientId": "11111111-2222-3333-4444-555555555555",
                "title": "Registro fora do invariante",
                "stage": "BRIEFING",
                "startDate": "2024-01-10",
                "deadline": "2024-06-10",
                "totalValue": 1000.0,
                "paidValue": 2500.0,
                "progress": 140
            }]"#,
        )
        .await;

        let store = ProjectStore::open(blob).await;
        let projects = store.snapshot().await;
        assert_eq!(projects[0].progress, 100);
        assert_eq!(projects[0].paid_value, Decimal::new(1_000, 0));
        assert_eq!(projects[0].rrt_status, RrtStatus::Pending);
        assert!(projects[0].daily_logs.is_empty());
    }

    #[tokio::test]
    async fn seed_has_one_project_under_construction() {
        let store = ProjectStore::open(temp_store()).await;
        let projects = store.snapshot().await;
        assert_eq!(projects.len(), 2);
        assert!(
            projects
                .iter()
                .any(|p| p.stage == ProjectStage::Construction)
        );
    }
}
