// src/services/project_service.rs

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::projects::{
        DailyLog, MaterialApproval, MaterialStatus, Project, ProjectFinancials, ProjectPortal,
        ProjectStage, RrtStatus, stage_stepper,
    },
    services::NotificationService,
    services::dashboard_service::{margin_percent, paid_percent},
    store::ProjectStore,
};

// Percentual cobrado por milestone (25% do contrato por etapa).
const MILESTONE_SHARE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Acompanhamento de projetos e obras: transições de etapa, governança de
/// RRT, milestones financeiros, diário de obra e curadoria de materiais.
#[derive(Clone)]
pub struct ProjectService {
    store: ProjectStore,
    notifier: NotificationService,
}

impl ProjectService {
    pub fn new(store: ProjectStore, notifier: NotificationService) -> Self {
        Self { store, notifier }
    }

    pub async fn list_projects(&self) -> Vec<Project> {
        self.store.snapshot().await
    }

    pub async fn get_project(&self, id: Uuid) -> Result<Project, AppError> {
        self.store.find(id).await.ok_or(AppError::ProjectNotFound)
    }

    pub async fn create_project(
        &self,
        title: String,
        client_name: String,
        total_value: Decimal,
        deadline: NaiveDate,
    ) -> Project {
        let project = Project {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            client_name,
            title,
            stage: ProjectStage::Briefing,
            start_date: Utc::now().date_naive(),
            deadline,
            total_value,
            paid_value: Decimal::ZERO,
            costs: Decimal::ZERO,
            progress: 0,
            rrt_status: RrtStatus::Pending,
            rrt_number: None,
            daily_logs: Vec::new(),
            material_approvals: Vec::new(),
        };

        let mut projects = self.store.snapshot().await;
        projects.insert(0, project.clone());
        self.store.replace_all(projects).await;
        project
    }

    /// Exclusão explícita e destrutiva (a confirmação é da UI).
    pub async fn delete_project(&self, id: Uuid) -> Result<(), AppError> {
        let mut projects = self.store.snapshot().await;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Err(AppError::ProjectNotFound);
        }
        self.store.replace_all(projects).await;
        Ok(())
    }

    /// Muda a etapa do ciclo de vida. O salto pode ser para qualquer etapa,
    /// inclusive para trás; o stepper do portal é quem impõe a leitura
    /// ordenada.
    pub async fn set_stage(&self, id: Uuid, stage: ProjectStage) -> Result<Project, AppError> {
        self.mutate_project(id, |project| project.stage = stage).await
    }

    /// Emite a RRT: one-way Pending -> Paid com número gerado. Reemitir
    /// depois de paga é idempotente e devolve o documento existente.
    pub async fn issue_rrt(&self, id: Uuid) -> Result<Project, AppError> {
        let number = format!(
            "RRT-{}-{}",
            Utc::now().year(),
            rand::thread_rng().gen_range(1000..10000)
        );

        let project = self
            .mutate_project(id, move |project| {
                if project.rrt_status == RrtStatus::Paid {
                    return;
                }
                project.rrt_status = RrtStatus::Paid;
                project.rrt_number = Some(number);
            })
            .await?;

        self.notifier.notify(
            "RRT Emitida",
            &format!(
                "{} agora está coberto pelo documento {}.",
                project.title,
                project.rrt_number.as_deref().unwrap_or("-")
            ),
        );
        Ok(project)
    }

    /// Cobra a próxima etapa: 25% do contrato, saturando no valor total.
    pub async fn charge_milestone(&self, id: Uuid) -> Result<Project, AppError> {
        let project = self
            .mutate_project(id, |project| {
                let increment = project.total_value * MILESTONE_SHARE;
                project.paid_value = (project.paid_value + increment).min(project.total_value);
            })
            .await?;

        self.notifier.notify(
            "Cobrança Enviada",
            &format!(
                "Milestone de {} cobrado. Recebido: R$ {} de R$ {}.",
                project.title, project.paid_value, project.total_value
            ),
        );
        Ok(project)
    }

    pub async fn set_progress(&self, id: Uuid, progress: u8) -> Result<Project, AppError> {
        self.mutate_project(id, move |project| {
            project.progress = progress.min(100);
        })
        .await
    }

    pub async fn record_costs(&self, id: Uuid, costs: Decimal) -> Result<Project, AppError> {
        self.mutate_project(id, move |project| {
            project.costs = costs.max(Decimal::ZERO);
        })
        .await
    }

    // --- DIÁRIO DE OBRA ---

    pub async fn add_daily_log(
        &self,
        id: Uuid,
        content: String,
        image_url: Option<String>,
    ) -> Result<DailyLog, AppError> {
        let log = DailyLog {
            id: Uuid::new_v4(),
            date: Utc::now().date_naive(),
            content,
            image_url,
        };
        let created = log.clone();
        self.mutate_project(id, move |project| {
            // Registro mais novo primeiro, como a timeline renderiza.
            project.daily_logs.insert(0, log);
        })
        .await?;
        Ok(created)
    }

    // --- CURADORIA DE MATERIAIS ---

    pub async fn add_material(
        &self,
        id: Uuid,
        name: String,
        category: String,
        image_url: String,
    ) -> Result<MaterialApproval, AppError> {
        let material = MaterialApproval {
            id: Uuid::new_v4(),
            name,
            category,
            status: MaterialStatus::Pending,
            image_url,
        };
        let created = material.clone();
        self.mutate_project(id, move |project| {
            project.material_approvals.push(material);
        })
        .await?;
        Ok(created)
    }

    /// Aprovação do cliente, one-way. Aprovar de novo não muda nada.
    pub async fn approve_material(
        &self,
        project_id: Uuid,
        material_id: Uuid,
    ) -> Result<MaterialApproval, AppError> {
        let mut projects = self.store.snapshot().await;
        let project = projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or(AppError::ProjectNotFound)?;
        let material = project
            .material_approvals
            .iter_mut()
            .find(|m| m.id == material_id)
            .ok_or(AppError::MaterialNotFound)?;
        material.status = MaterialStatus::Approved;
        let approved = material.clone();
        let title = project.title.clone();

        self.store.replace_all(projects).await;

        self.notifier.notify(
            "Material Aprovado",
            &format!("{} aprovado pelo cliente em {}.", approved.name, title),
        );
        Ok(approved)
    }

    /// Visão financeira gerencial do contrato, derivada do snapshot.
    pub async fn financials(&self, id: Uuid) -> Result<ProjectFinancials, AppError> {
        let project = self.get_project(id).await?;
        Ok(ProjectFinancials {
            total_value: project.total_value,
            paid_value: project.paid_value,
            costs: project.costs,
            outstanding_balance: project.total_value - project.paid_value,
            paid_percent: paid_percent(project.paid_value, project.total_value),
            margin_percent: margin_percent(project.total_value, project.costs),
        })
    }

    /// Recorte do projeto que o Portal do Cliente consome.
    pub async fn portal(&self, id: Uuid) -> Result<ProjectPortal, AppError> {
        let project = self.get_project(id).await?;
        Ok(ProjectPortal {
            id: project.id,
            title: project.title,
            deadline: project.deadline,
            progress: project.progress,
            paid_percent: paid_percent(project.paid_value, project.total_value),
            stepper: stage_stepper(project.stage),
            daily_logs: project.daily_logs,
            material_approvals: project.material_approvals,
        })
    }

    async fn mutate_project(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut Project),
    ) -> Result<Project, AppError> {
        let mut projects = self.store.snapshot().await;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::ProjectNotFound)?;
        apply(project);
        let updated = project.clone();

        self.store.replace_all(projects).await;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::projects::StageState;
    use crate::store::blob::tests::temp_store;
    use chrono::Duration;

    async fn service() -> ProjectService {
        let store = ProjectStore::open(temp_store()).await;
        ProjectService::new(store, NotificationService::new(None))
    }

    async fn new_project(svc: &ProjectService) -> Project {
        svc.create_project(
            "Loft Pinheiros".into(),
            "João da Silva".into(),
            Decimal::new(20_000, 0),
            Utc::now().date_naive() + Duration::days(90),
        )
        .await
    }

    #[tokio::test]
    async fn create_starts_at_briefing_with_zeroed_financials() {
        let svc = service().await;
        let project = new_project(&svc).await;
        assert_eq!(project.stage, ProjectStage::Briefing);
        assert_eq!(project.paid_value, Decimal::ZERO);
        assert_eq!(project.progress, 0);
        assert_eq!(project.rrt_status, RrtStatus::Pending);
    }

    #[tokio::test]
    async fn stage_jump_updates_the_portal_stepper() {
        let svc = service().await;
        let project = new_project(&svc).await;

        let moved = svc
            .set_stage(project.id, ProjectStage::Construction)
            .await
            .unwrap();
        assert_eq!(moved.stage, ProjectStage::Construction);

        let portal = svc.portal(project.id).await.unwrap();
        let states: Vec<StageState> = portal.stepper.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![
                StageState::Completed,
                StageState::Completed,
                StageState::Completed,
                StageState::Current,
                StageState::Locked,
            ]
        );
    }

    #[tokio::test]
    async fn rrt_issue_is_one_way_and_idempotent() {
        let svc = service().await;
        let project = new_project(&svc).await;

        let issued = svc.issue_rrt(project.id).await.unwrap();
        assert_eq!(issued.rrt_status, RrtStatus::Paid);
        let number = issued.rrt_number.clone().expect("número gerado");
        assert!(number.starts_with("RRT-"));

        // Reemitir não troca o número nem regride o status.
        let again = svc.issue_rrt(project.id).await.unwrap();
        assert_eq!(again.rrt_number, Some(number));
        assert_eq!(again.rrt_status, RrtStatus::Paid);
    }

    #[tokio::test]
    async fn milestone_charges_saturate_at_total_value() {
        let svc = service().await;
        let project = new_project(&svc).await;
        let total = project.total_value;

        // 5 cobranças de 25%: a última não pode passar do contrato.
        let mut paid = Decimal::ZERO;
        for _ in 0..5 {
            paid = svc.charge_milestone(project.id).await.unwrap().paid_value;
        }
        assert_eq!(paid, total);
    }

    #[tokio::test]
    async fn progress_is_clamped_to_100() {
        let svc = service().await;
        let project = new_project(&svc).await;
        let updated = svc.set_progress(project.id, 250).await.unwrap();
        assert_eq!(updated.progress, 100);
    }

    #[tokio::test]
    async fn material_approval_is_one_way() {
        let svc = service().await;
        let project = new_project(&svc).await;
        let material = svc
            .add_material(
                project.id,
                "Cumaru Natural".into(),
                "Deck Varanda".into(),
                "https://example.com/cumaru.jpg".into(),
            )
            .await
            .unwrap();
        assert_eq!(material.status, MaterialStatus::Pending);

        let approved = svc.approve_material(project.id, material.id).await.unwrap();
        assert_eq!(approved.status, MaterialStatus::Approved);

        let again = svc.approve_material(project.id, material.id).await.unwrap();
        assert_eq!(again.status, MaterialStatus::Approved);
    }

    #[tokio::test]
    async fn financials_derive_percentages_and_guard_zero_contract() {
        let svc = service().await;
        let project = new_project(&svc).await;

        svc.record_costs(project.id, Decimal::new(5_000, 0))
            .await
            .unwrap();
        svc.charge_milestone(project.id).await.unwrap();

        let fin = svc.financials(project.id).await.unwrap();
        // Contrato de 20k: 25% cobrado, 5k de custo.
        assert_eq!(fin.paid_percent, Decimal::new(25, 0));
        assert_eq!(fin.margin_percent, Some(Decimal::new(75, 0)));
        assert_eq!(fin.outstanding_balance, Decimal::new(15_000, 0));

        // Contrato zerado: margem indefinida, sem pânico.
        let zero = svc
            .create_project(
                "Pro bono".into(),
                "ONG Horizonte".into(),
                Decimal::ZERO,
                Utc::now().date_naive() + Duration::days(30),
            )
            .await;
        let fin = svc.financials(zero.id).await.unwrap();
        assert_eq!(fin.margin_percent, None);
        assert_eq!(fin.paid_percent, Decimal::ZERO);
    }

    #[tokio::test]
    async fn delete_removes_and_further_reads_fail() {
        let svc = service().await;
        let project = new_project(&svc).await;

        svc.delete_project(project.id).await.unwrap();
        let result = svc.get_project(project.id).await;
        assert!(matches!(result, Err(AppError::ProjectNotFound)));

        let again = svc.delete_project(project.id).await;
        assert!(matches!(again, Err(AppError::ProjectNotFound)));
    }
}
