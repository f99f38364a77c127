//! Market assessment session.
//!
//! A session is either a draft (`Konsep`) that can be edited and recomputed,
//! or finalized (`Tersimpan`). Finalized documents expose no mutators; edits
//! routed through [`AssessmentDoc`] or the aggregate are dropped silently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rigops_assets::Asset;
use rigops_core::{Aggregate, AggregateRoot, AssessmentId, DomainError, DomainEvent, DomainResult};

use crate::availability::{AvailabilityFilter, MarketSnapshot};
use crate::filter::AssessmentFilter;

/// Placeholder id shown until an assessment is finalized.
pub const UNSAVED_ID: &str = "NEW";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentStatus {
    /// Draft.
    Konsep,
    /// Finalized; read-only.
    Tersimpan,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAssessment {
    pub title: String,
    pub filters: AssessmentFilter,
    pub candidates: Vec<Asset>,
    /// Set once candidates come from a calculation over the current filters.
    pub is_calculated: bool,
}

impl DraftAssessment {
    pub fn new(title: impl Into<String>, filters: AssessmentFilter) -> Self {
        Self {
            title: title.into(),
            filters,
            candidates: Vec::new(),
            is_calculated: false,
        }
    }

    /// Replace the filters. Previously computed candidates no longer apply.
    pub fn set_filters(&mut self, filters: AssessmentFilter) {
        self.filters = filters;
        self.candidates.clear();
        self.is_calculated = false;
    }

    pub fn record_candidates(&mut self, candidates: Vec<Asset>) {
        self.candidates = candidates;
        self.is_calculated = true;
    }

    /// Recompute candidates for the current filters.
    pub fn calculate(&mut self, filter: &AvailabilityFilter, market: MarketSnapshot<'_>) -> &[Asset] {
        let candidates = filter.candidates(&self.filters, market);
        self.record_candidates(candidates);
        &self.candidates
    }

    /// Refuse to persist an empty, never-calculated draft.
    pub fn ensure_saveable(&self) -> DomainResult<()> {
        if self.candidates.is_empty() && !self.is_calculated {
            return Err(DomainError::precondition(
                "run the market calculation before saving this assessment",
            ));
        }
        Ok(())
    }

    pub fn finalize(self, id: AssessmentId, at: DateTime<Utc>) -> DomainResult<FinalizedAssessment> {
        self.ensure_saveable()?;
        Ok(self.into_finalized(id, at))
    }

    fn into_finalized(self, id: AssessmentId, at: DateTime<Utc>) -> FinalizedAssessment {
        FinalizedAssessment {
            id,
            title: self.title,
            filters: self.filters,
            candidates: self.candidates,
            finalized_at: at,
        }
    }
}

/// Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedAssessment {
    id: AssessmentId,
    title: String,
    filters: AssessmentFilter,
    candidates: Vec<Asset>,
    finalized_at: DateTime<Utc>,
}

impl FinalizedAssessment {
    pub fn id(&self) -> AssessmentId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn filters(&self) -> &AssessmentFilter {
        &self.filters
    }

    pub fn candidates(&self) -> &[Asset] {
        &self.candidates
    }

    pub fn finalized_at(&self) -> DateTime<Utc> {
        self.finalized_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum AssessmentDoc {
    #[serde(rename = "Konsep")]
    Draft(DraftAssessment),
    #[serde(rename = "Tersimpan")]
    Finalized(FinalizedAssessment),
}

impl AssessmentDoc {
    pub fn new(title: impl Into<String>, filters: AssessmentFilter) -> Self {
        AssessmentDoc::Draft(DraftAssessment::new(title, filters))
    }

    pub fn status(&self) -> AssessmentStatus {
        match self {
            AssessmentDoc::Draft(_) => AssessmentStatus::Konsep,
            AssessmentDoc::Finalized(_) => AssessmentStatus::Tersimpan,
        }
    }

    pub fn id(&self) -> Option<AssessmentId> {
        match self {
            AssessmentDoc::Draft(_) => None,
            AssessmentDoc::Finalized(doc) => Some(doc.id),
        }
    }

    /// `"NEW"` for drafts, the assessment id afterwards.
    pub fn display_id(&self) -> String {
        self.id()
            .map_or_else(|| UNSAVED_ID.to_string(), |id| id.to_string())
    }

    pub fn title(&self) -> &str {
        match self {
            AssessmentDoc::Draft(doc) => &doc.title,
            AssessmentDoc::Finalized(doc) => &doc.title,
        }
    }

    pub fn filters(&self) -> &AssessmentFilter {
        match self {
            AssessmentDoc::Draft(doc) => &doc.filters,
            AssessmentDoc::Finalized(doc) => &doc.filters,
        }
    }

    pub fn candidates(&self) -> &[Asset] {
        match self {
            AssessmentDoc::Draft(doc) => &doc.candidates,
            AssessmentDoc::Finalized(doc) => &doc.candidates,
        }
    }

    pub fn is_calculated(&self) -> bool {
        match self {
            AssessmentDoc::Draft(doc) => doc.is_calculated,
            AssessmentDoc::Finalized(_) => true,
        }
    }

    pub fn as_draft_mut(&mut self) -> Option<&mut DraftAssessment> {
        match self {
            AssessmentDoc::Draft(doc) => Some(doc),
            AssessmentDoc::Finalized(_) => None,
        }
    }

    /// Returns whether the change was applied.
    pub fn update_filters(&mut self, filters: AssessmentFilter) -> bool {
        self.edit_draft("update_filters", |draft| draft.set_filters(filters))
    }

    pub fn rename(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        self.edit_draft("rename", |draft| draft.title = title)
    }

    pub fn record_candidates(&mut self, candidates: Vec<Asset>) -> bool {
        self.edit_draft("record_candidates", |draft| draft.record_candidates(candidates))
    }

    /// Recompute candidates on a draft; finalized documents keep theirs.
    pub fn run(&mut self, filter: &AvailabilityFilter, market: MarketSnapshot<'_>) -> &[Asset] {
        if let AssessmentDoc::Draft(draft) = self {
            draft.calculate(filter, market);
        }
        self.candidates()
    }

    /// Freeze a draft under `id`. Finalizing twice is a no-op.
    pub fn finalize(&mut self, id: AssessmentId, at: DateTime<Utc>) -> DomainResult<()> {
        let AssessmentDoc::Draft(draft) = self else {
            return Ok(());
        };
        draft.ensure_saveable()?;
        let draft = std::mem::take(draft);
        *self = AssessmentDoc::Finalized(draft.into_finalized(id, at));
        tracing::info!(assessment_id = %id, "market assessment finalized");
        Ok(())
    }

    fn edit_draft(&mut self, op: &'static str, edit: impl FnOnce(&mut DraftAssessment)) -> bool {
        match self {
            AssessmentDoc::Draft(draft) => {
                edit(draft);
                true
            }
            AssessmentDoc::Finalized(doc) => {
                tracing::debug!(assessment_id = %doc.id, op, "ignored edit on finalized assessment");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Event-sourced session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAssessment {
    pub assessment_id: AssessmentId,
    pub title: String,
    pub filters: AssessmentFilter,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFilters {
    pub assessment_id: AssessmentId,
    pub filters: AssessmentFilter,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameAssessment {
    pub assessment_id: AssessmentId,
    pub title: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCandidates {
    pub assessment_id: AssessmentId,
    pub candidates: Vec<Asset>,
    pub occurred_at: DateTime<Utc>,
}

/// Save as draft (`finalize: false`) or as final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAssessment {
    pub assessment_id: AssessmentId,
    pub finalize: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentCommand {
    OpenAssessment(OpenAssessment),
    UpdateFilters(UpdateFilters),
    RenameAssessment(RenameAssessment),
    RecordCandidates(RecordCandidates),
    SaveAssessment(SaveAssessment),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentEvent {
    AssessmentOpened {
        assessment_id: AssessmentId,
        title: String,
        filters: AssessmentFilter,
        occurred_at: DateTime<Utc>,
    },
    FiltersUpdated {
        assessment_id: AssessmentId,
        filters: AssessmentFilter,
        occurred_at: DateTime<Utc>,
    },
    AssessmentRenamed {
        assessment_id: AssessmentId,
        title: String,
        occurred_at: DateTime<Utc>,
    },
    CandidatesCalculated {
        assessment_id: AssessmentId,
        candidates: Vec<Asset>,
        occurred_at: DateTime<Utc>,
    },
    DraftSaved {
        assessment_id: AssessmentId,
        occurred_at: DateTime<Utc>,
    },
    AssessmentFinalized {
        assessment_id: AssessmentId,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent for AssessmentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AssessmentEvent::AssessmentOpened { .. } => "market.assessment.opened",
            AssessmentEvent::FiltersUpdated { .. } => "market.assessment.filters_updated",
            AssessmentEvent::AssessmentRenamed { .. } => "market.assessment.renamed",
            AssessmentEvent::CandidatesCalculated { .. } => "market.assessment.candidates_calculated",
            AssessmentEvent::DraftSaved { .. } => "market.assessment.draft_saved",
            AssessmentEvent::AssessmentFinalized { .. } => "market.assessment.finalized",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AssessmentEvent::AssessmentOpened { occurred_at, .. }
            | AssessmentEvent::FiltersUpdated { occurred_at, .. }
            | AssessmentEvent::AssessmentRenamed { occurred_at, .. }
            | AssessmentEvent::CandidatesCalculated { occurred_at, .. }
            | AssessmentEvent::DraftSaved { occurred_at, .. }
            | AssessmentEvent::AssessmentFinalized { occurred_at, .. } => *occurred_at,
        }
    }
}

/// Aggregate root wrapping an [`AssessmentDoc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentSession {
    id: AssessmentId,
    doc: Option<AssessmentDoc>,
    last_saved_at: Option<DateTime<Utc>>,
    version: u64,
}

impl AssessmentSession {
    /// Not-yet-opened session, for rehydration.
    pub fn empty(id: AssessmentId) -> Self {
        Self {
            id,
            doc: None,
            last_saved_at: None,
            version: 0,
        }
    }

    pub fn doc(&self) -> Option<&AssessmentDoc> {
        self.doc.as_ref()
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    fn handle_open(&self, cmd: &OpenAssessment) -> DomainResult<Vec<AssessmentEvent>> {
        if self.doc.is_some() {
            return Err(DomainError::conflict("assessment already exists"));
        }
        if self.id != cmd.assessment_id {
            return Err(DomainError::invariant("assessment_id mismatch"));
        }
        if cmd.title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        Ok(vec![AssessmentEvent::AssessmentOpened {
            assessment_id: cmd.assessment_id,
            title: cmd.title.clone(),
            filters: cmd.filters.clone(),
            occurred_at: cmd.occurred_at,
        }])
    }

    /// Run `decide` against the draft; finalized sessions emit nothing.
    fn on_draft(
        &self,
        assessment_id: AssessmentId,
        decide: impl FnOnce(&DraftAssessment) -> DomainResult<AssessmentEvent>,
    ) -> DomainResult<Vec<AssessmentEvent>> {
        if self.id != assessment_id {
            return Err(DomainError::invariant("assessment_id mismatch"));
        }
        match &self.doc {
            None => Err(DomainError::not_found()),
            Some(AssessmentDoc::Draft(draft)) => Ok(vec![decide(draft)?]),
            Some(AssessmentDoc::Finalized(_)) => {
                tracing::debug!(%assessment_id, "command ignored; assessment is finalized");
                Ok(Vec::new())
            }
        }
    }
}

impl AggregateRoot for AssessmentSession {
    type Id = AssessmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for AssessmentSession {
    type Command = AssessmentCommand;
    type Event = AssessmentEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            AssessmentEvent::AssessmentOpened { title, filters, .. } => {
                self.doc = Some(AssessmentDoc::new(title.clone(), filters.clone()));
            }
            AssessmentEvent::FiltersUpdated { filters, .. } => {
                if let Some(doc) = self.doc.as_mut() {
                    doc.update_filters(filters.clone());
                }
            }
            AssessmentEvent::AssessmentRenamed { title, .. } => {
                if let Some(doc) = self.doc.as_mut() {
                    doc.rename(title.clone());
                }
            }
            AssessmentEvent::CandidatesCalculated { candidates, .. } => {
                if let Some(doc) = self.doc.as_mut() {
                    doc.record_candidates(candidates.clone());
                }
            }
            AssessmentEvent::DraftSaved { .. } => {
                self.last_saved_at = Some(event.occurred_at());
            }
            AssessmentEvent::AssessmentFinalized {
                assessment_id,
                occurred_at,
            } => {
                if let Some(AssessmentDoc::Draft(draft)) = self.doc.as_mut() {
                    // Saveability was checked in `handle`.
                    let draft = std::mem::take(draft);
                    self.doc = Some(AssessmentDoc::Finalized(
                        draft.into_finalized(*assessment_id, *occurred_at),
                    ));
                }
                self.last_saved_at = Some(*occurred_at);
            }
        }

        self.version += 1;
        tracing::debug!(
            assessment_id = %self.id,
            event = event.event_type(),
            version = self.version,
            "assessment event applied"
        );
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            AssessmentCommand::OpenAssessment(cmd) => self.handle_open(cmd),
            AssessmentCommand::UpdateFilters(cmd) => self.on_draft(cmd.assessment_id, |_| {
                Ok(AssessmentEvent::FiltersUpdated {
                    assessment_id: cmd.assessment_id,
                    filters: cmd.filters.clone(),
                    occurred_at: cmd.occurred_at,
                })
            }),
            AssessmentCommand::RenameAssessment(cmd) => self.on_draft(cmd.assessment_id, |_| {
                if cmd.title.trim().is_empty() {
                    return Err(DomainError::validation("title cannot be empty"));
                }
                Ok(AssessmentEvent::AssessmentRenamed {
                    assessment_id: cmd.assessment_id,
                    title: cmd.title.clone(),
                    occurred_at: cmd.occurred_at,
                })
            }),
            AssessmentCommand::RecordCandidates(cmd) => self.on_draft(cmd.assessment_id, |_| {
                Ok(AssessmentEvent::CandidatesCalculated {
                    assessment_id: cmd.assessment_id,
                    candidates: cmd.candidates.clone(),
                    occurred_at: cmd.occurred_at,
                })
            }),
            AssessmentCommand::SaveAssessment(cmd) => self.on_draft(cmd.assessment_id, |draft| {
                draft.ensure_saveable()?;
                Ok(if cmd.finalize {
                    AssessmentEvent::AssessmentFinalized {
                        assessment_id: cmd.assessment_id,
                        occurred_at: cmd.occurred_at,
                    }
                } else {
                    AssessmentEvent::DraftSaved {
                        assessment_id: cmd.assessment_id,
                        occurred_at: cmd.occurred_at,
                    }
                })
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rigops_assets::AssetCategory;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn june_filters() -> AssessmentFilter {
        AssessmentFilter::for_window(d(2025, 6, 1), d(2025, 6, 30)).min_year(2010)
    }

    fn rig_a() -> Asset {
        Asset::new("Rig A", AssetCategory::OffshoreRig, 2015, "2000 HP", "Natuna")
    }

    fn opened_session() -> AssessmentSession {
        let id = AssessmentId::new();
        let mut session = AssessmentSession::empty(id);
        session
            .execute(&AssessmentCommand::OpenAssessment(OpenAssessment {
                assessment_id: id,
                title: "Natuna rig sourcing".to_string(),
                filters: june_filters(),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        session
    }

    fn save(session: &AssessmentSession, finalize: bool) -> AssessmentCommand {
        AssessmentCommand::SaveAssessment(SaveAssessment {
            assessment_id: *session.id(),
            finalize,
            occurred_at: Utc::now(),
        })
    }

    #[test]
    fn new_doc_is_unsaved_draft() {
        let doc = AssessmentDoc::new("x", june_filters());
        assert_eq!(doc.status(), AssessmentStatus::Konsep);
        assert_eq!(doc.display_id(), "NEW");
        assert!(!doc.is_calculated());
    }

    #[test]
    fn saving_uncalculated_empty_draft_is_refused() {
        let mut doc = AssessmentDoc::new("x", june_filters());
        let err = doc.finalize(AssessmentId::new(), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));
        assert_eq!(doc.status(), AssessmentStatus::Konsep);
    }

    #[test]
    fn calculated_empty_result_can_be_saved() {
        let mut doc = AssessmentDoc::new("x", june_filters());
        assert!(doc.run(&AvailabilityFilter::default(), MarketSnapshot::new(&[], &[], &[])).is_empty());
        assert!(doc.is_calculated());
        let id = AssessmentId::new();
        doc.finalize(id, Utc::now()).unwrap();
        assert_eq!(doc.status(), AssessmentStatus::Tersimpan);
        assert_eq!(doc.display_id(), id.to_string());
    }

    #[test]
    fn finalized_doc_ignores_edits() {
        let mut doc = AssessmentDoc::new("Original", june_filters());
        doc.record_candidates(vec![rig_a()]);
        doc.finalize(AssessmentId::new(), Utc::now()).unwrap();

        let frozen = doc.clone();
        assert!(!doc.update_filters(AssessmentFilter::default().min_year(2030)));
        assert!(!doc.rename("Changed"));
        assert!(!doc.record_candidates(Vec::new()));
        assert!(doc.as_draft_mut().is_none());

        let assets = [Asset::new("Other", AssetCategory::Barge, 2020, "1 T", "Batam")];
        doc.run(&AvailabilityFilter::default(), MarketSnapshot::new(&assets, &[], &[]));

        assert_eq!(doc, frozen);
        assert_eq!(doc.filters(), &june_filters());
        assert_eq!(doc.title(), "Original");
    }

    #[test]
    fn changing_filters_invalidates_candidates() {
        let mut doc = AssessmentDoc::new("x", june_filters());
        doc.record_candidates(vec![rig_a()]);
        assert!(doc.update_filters(june_filters().min_capacity(5000)));
        assert!(doc.candidates().is_empty());
        assert!(!doc.is_calculated());
        assert!(doc.finalize(AssessmentId::new(), Utc::now()).is_err());
    }

    #[test]
    fn doc_serializes_with_status_tag() {
        let doc = AssessmentDoc::new("x", AssessmentFilter::default());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["status"], "Konsep");
        let back: AssessmentDoc = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn session_open_twice_conflicts() {
        let session = opened_session();
        let err = session
            .handle(&AssessmentCommand::OpenAssessment(OpenAssessment {
                assessment_id: *session.id(),
                title: "again".to_string(),
                filters: AssessmentFilter::default(),
                occurred_at: Utc::now(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn session_commands_before_open_are_not_found() {
        let id = AssessmentId::new();
        let session = AssessmentSession::empty(id);
        let err = session
            .handle(&AssessmentCommand::SaveAssessment(SaveAssessment {
                assessment_id: id,
                finalize: false,
                occurred_at: Utc::now(),
            }))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn session_save_without_calculation_is_precondition_error() {
        let session = opened_session();
        let err = session.handle(&save(&session, true)).unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));
    }

    #[test]
    fn session_draft_save_then_finalize() {
        let mut session = opened_session();
        let id = *session.id();
        session
            .execute(&AssessmentCommand::RecordCandidates(RecordCandidates {
                assessment_id: id,
                candidates: vec![rig_a()],
                occurred_at: Utc::now(),
            }))
            .unwrap();

        let cmd = save(&session, false);
        let events = session.execute(&cmd).unwrap();
        assert_eq!(events[0].event_type(), "market.assessment.draft_saved");
        assert_eq!(session.doc().unwrap().status(), AssessmentStatus::Konsep);
        assert!(session.last_saved_at().is_some());

        let cmd = save(&session, true);
        let events = session.execute(&cmd).unwrap();
        assert_eq!(events[0].event_type(), "market.assessment.finalized");
        let doc = session.doc().unwrap();
        assert_eq!(doc.status(), AssessmentStatus::Tersimpan);
        assert_eq!(doc.id(), Some(id));
        assert_eq!(session.version(), 4);
    }

    #[test]
    fn session_ignores_edits_after_finalize() {
        let mut session = opened_session();
        let id = *session.id();
        session
            .execute(&AssessmentCommand::RecordCandidates(RecordCandidates {
                assessment_id: id,
                candidates: vec![rig_a()],
                occurred_at: Utc::now(),
            }))
            .unwrap();
        let finalize = save(&session, true);
        session.execute(&finalize).unwrap();
        let version = session.version();

        let events = session
            .execute(&AssessmentCommand::UpdateFilters(UpdateFilters {
                assessment_id: id,
                filters: AssessmentFilter::default().min_year(2030),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        assert!(events.is_empty());
        assert!(session.execute(&finalize).unwrap().is_empty());
        assert_eq!(session.version(), version);
        assert_eq!(session.doc().unwrap().filters(), &june_filters());
    }

    #[test]
    fn session_rejects_foreign_id() {
        let session = opened_session();
        let err = session
            .handle(&AssessmentCommand::RenameAssessment(RenameAssessment {
                assessment_id: AssessmentId::new(),
                title: "x".to_string(),
                occurred_at: Utc::now(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }
}
