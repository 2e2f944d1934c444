// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation registry and dispatcher.
//!
//! The registry maps every [`Operation`] to its scope, access gate and
//! handler through an exhaustive `match`, so adding an operation without a
//! handler does not compile. [`Registry::new`] additionally verifies at
//! startup that wire names are unique and resolve back to their operation.

use std::collections::{HashMap, HashSet};

use confreview::{Command, State, TransitionResult, apply};
use confreview_audit::Cause;
use confreview_domain::{Conference, ConferenceId, ContributionId, JudgementSlot, ReviewRole};
use confreview_persistence::Persistence;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::auth::AuthenticatedActor;
use crate::error::{ServiceError, translate_core_error, translate_domain_error};
use crate::handlers::{assignment, attachments, judgement, setup, team};
use crate::notify::Notifier;
use crate::operation::Operation;
use crate::params::{ParameterManager, missing_as};
use crate::permissions::{Permission, PermissionContext, Predicate};

const PRM: Permission = Permission::any(&[Predicate::PaperReviewManager]);
const AM: Permission = Permission::any(&[Predicate::AbstractManager]);
const PRM_OR_AM: Permission =
    Permission::any(&[Predicate::PaperReviewManager, Predicate::AbstractManager]);
const PRM_OR_TEAM_REFEREE: Permission =
    Permission::any(&[Predicate::PaperReviewManager, Predicate::ConferenceReferee]);
const PRM_OR_REFEREE_OF_ALL: Permission = Permission::any(&[
    Predicate::PaperReviewManager,
    Predicate::RefereeOfAllContributions,
]);
const JUDGEMENT_OWNER_OR_PRM: Permission =
    Permission::any(&[Predicate::JudgementOwner, Predicate::PaperReviewManager]);

/// What an operation targets, which decides the parameters extracted
/// before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The conference review as a whole.
    Conference,
    /// A `contributions` list of the conference.
    Assignment,
    /// One `contribution` and, optionally, a `current` judgement kind.
    Contribution,
    /// Attachment folders of the conference or one of its contributions.
    Attachments,
}

/// Access gate of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Anyone may call; the handler filters what it returns.
    Public,
    /// The permission must pass.
    Guarded(Permission),
}

/// A handler turns a prepared context into a JSON answer.
pub type Handler = fn(&mut HandlerContext<'_>) -> Result<Value, ServiceError>;

/// Registry entry for one operation.
#[derive(Debug, Clone, Copy)]
pub struct HandlerSpec {
    pub scope: Scope,
    pub gate: Gate,
    pub handler: Handler,
}

const fn spec(scope: Scope, gate: Gate, handler: Handler) -> HandlerSpec {
    HandlerSpec {
        scope,
        gate,
        handler,
    }
}

#[allow(clippy::too_many_lines)]
const fn spec_for(operation: Operation) -> HandlerSpec {
    use Gate::Guarded;
    use Scope::{Assignment, Attachments, Conference, Contribution};

    match operation {
        Operation::ChangeReviewingMode => {
            spec(Conference, Guarded(PRM), setup::change_reviewing_mode)
        }
        Operation::ChangeStates => spec(Conference, Guarded(PRM), setup::change_states),
        Operation::ChangeQuestions => spec(Conference, Guarded(PRM), setup::change_questions),
        Operation::ChangeCriteria => spec(Conference, Guarded(PRM), setup::change_criteria),
        Operation::DeleteTemplate => spec(Conference, Guarded(PRM), setup::delete_template),
        Operation::ChangeCompetences => {
            spec(Conference, Guarded(PRM_OR_AM), setup::change_competences)
        }
        Operation::ChangeDefaultDueDate => {
            spec(Conference, Guarded(PRM), setup::change_default_due_date)
        }
        Operation::ChangeAbstractReviewerDefaultDueDate => spec(
            Conference,
            Guarded(AM),
            setup::change_abstract_reviewer_default_due_date,
        ),
        Operation::AttributeList => {
            spec(Conference, Guarded(PRM_OR_TEAM_REFEREE), setup::attribute_list)
        }
        Operation::ContributionsIdPerSelectedAttribute => spec(
            Conference,
            Guarded(PRM_OR_TEAM_REFEREE),
            setup::contributions_per_selected_attribute,
        ),
        Operation::UserCompetencesList => spec(
            Conference,
            Guarded(PRM_OR_TEAM_REFEREE),
            setup::user_competences_list,
        ),

        Operation::AssignReferee => spec(Assignment, Guarded(PRM), assignment::assign_referee),
        Operation::RemoveReferee => spec(Assignment, Guarded(PRM), assignment::remove_referee),
        Operation::AssignEditor => {
            spec(Assignment, Guarded(PRM_OR_REFEREE_OF_ALL), assignment::assign_editor)
        }
        Operation::RemoveEditor => {
            spec(Assignment, Guarded(PRM_OR_REFEREE_OF_ALL), assignment::remove_editor)
        }
        Operation::AddReviewer => {
            spec(Assignment, Guarded(PRM_OR_REFEREE_OF_ALL), assignment::add_reviewer)
        }
        Operation::RemoveReviewer => {
            spec(Assignment, Guarded(PRM_OR_REFEREE_OF_ALL), assignment::remove_reviewer)
        }
        Operation::RemoveAllReviewers => spec(
            Assignment,
            Guarded(PRM_OR_REFEREE_OF_ALL),
            assignment::remove_all_reviewers,
        ),

        Operation::PrmEmailNotif
        | Operation::RefereeEmailNotif
        | Operation::EditorEmailNotif
        | Operation::ReviewerEmailNotif
        | Operation::RefereeEmailNotifForContribution
        | Operation::EditorEmailNotifForContribution
        | Operation::ReviewerEmailNotifForContribution
        | Operation::RefereeEmailJudgementNotif
        | Operation::EditorEmailJudgementNotif
        | Operation::ReviewerEmailJudgementNotif
        | Operation::AuthorSubmittedMatRefereeNotif
        | Operation::AuthorSubmittedMatEditorNotif
        | Operation::AuthorSubmittedMatReviewerNotif => {
            spec(Conference, Guarded(PRM), setup::toggle_notification)
        }

        Operation::AssignTeamPrm
        | Operation::AssignTeamReferee
        | Operation::AssignTeamEditor
        | Operation::AssignTeamReviewer => spec(Conference, Guarded(PRM_OR_AM), team::assign_team),
        Operation::RemoveTeamPrm
        | Operation::RemoveTeamReferee
        | Operation::RemoveTeamEditor
        | Operation::RemoveTeamReviewer => spec(Conference, Guarded(PRM_OR_AM), team::remove_team),

        Operation::ContributionChangeDueDate => spec(
            Contribution,
            Guarded(JUDGEMENT_OWNER_OR_PRM),
            judgement::change_due_date,
        ),
        Operation::ContributionChangeComments => spec(
            Contribution,
            Guarded(JUDGEMENT_OWNER_OR_PRM),
            judgement::change_comments,
        ),
        Operation::ContributionChangeJudgement => spec(
            Contribution,
            Guarded(JUDGEMENT_OWNER_OR_PRM),
            judgement::change_judgement,
        ),
        Operation::ContributionChangeCriteria => spec(
            Contribution,
            Guarded(JUDGEMENT_OWNER_OR_PRM),
            judgement::change_criteria,
        ),
        Operation::ContributionGetCriteria => spec(
            Contribution,
            Guarded(JUDGEMENT_OWNER_OR_PRM),
            judgement::get_criteria,
        ),
        Operation::ContributionSetSubmitted => spec(
            Contribution,
            Guarded(JUDGEMENT_OWNER_OR_PRM),
            judgement::set_submitted,
        ),

        Operation::ListFolders => spec(Attachments, Gate::Public, attachments::list_folders),
        Operation::CreateFolder => spec(
            Attachments,
            Guarded(Permission::managers_only()),
            attachments::create_folder,
        ),
        Operation::AddAttachment => spec(
            Attachments,
            Guarded(Permission::managers_only()),
            attachments::add_attachment,
        ),
    }
}

/// Every operation with its handler.
#[derive(Debug, Clone)]
pub struct Registry {
    handlers: HashMap<Operation, HandlerSpec>,
}

impl Registry {
    /// Builds the registry from [`Operation::ALL`].
    ///
    /// # Errors
    ///
    /// Returns an internal error if a wire name is duplicated or does not
    /// resolve back to its operation.
    pub fn new() -> Result<Self, ServiceError> {
        let mut handlers: HashMap<Operation, HandlerSpec> = HashMap::new();
        let mut names: HashSet<&'static str> = HashSet::new();

        for operation in Operation::ALL {
            let name: &'static str = operation.as_str();
            if !names.insert(name) {
                return Err(ServiceError::internal(
                    "ERR-R1",
                    format!("Operation name '{name}' is registered twice"),
                ));
            }
            if name.parse::<Operation>()? != operation {
                return Err(ServiceError::internal(
                    "ERR-R1",
                    format!("Operation name '{name}' resolves to another operation"),
                ));
            }
            handlers.insert(operation, spec_for(operation));
        }

        Ok(Self { handlers })
    }

    #[must_use]
    pub fn get(&self, operation: Operation) -> Option<&HandlerSpec> {
        self.handlers.get(&operation)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// One RPC call.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    pub method: String,
    pub actor: AuthenticatedActor,
    pub params: Map<String, Value>,
}

/// Everything a handler may read or change while serving one request.
///
/// Handlers read through [`HandlerContext::current`] and change state only
/// through [`HandlerContext::apply`]; the dispatcher persists the resulting
/// transitions once the handler returns successfully.
pub struct HandlerContext<'a> {
    pub operation: Operation,
    pub actor: &'a AuthenticatedActor,
    pub params: ParameterManager<'a>,
    /// Contributions named by assignment operations.
    pub contributions: Vec<ContributionId>,
    /// Contribution named by contribution and attachment operations.
    pub contribution: Option<ContributionId>,
    /// Judgement kind named by contribution operations, if recognized.
    pub judgement: Option<ReviewRole>,
    state: State,
    cause: Cause,
    transitions: Vec<TransitionResult>,
}

impl HandlerContext<'_> {
    /// The conference as of the last applied command.
    #[must_use]
    pub fn current(&self) -> &Conference {
        self.transitions
            .last()
            .map_or(&self.state.conference, |t| &t.new_state.conference)
    }

    /// Applies a command on top of the current conference.
    ///
    /// # Errors
    ///
    /// Returns the translated domain error if the command is rejected.
    pub fn apply(&mut self, command: Command) -> Result<&Conference, ServiceError> {
        let current: State = self
            .transitions
            .last()
            .map_or_else(|| self.state.clone(), |t| t.new_state.clone());
        let result: TransitionResult = apply(
            &current,
            command,
            self.actor.to_audit_actor(),
            self.cause.clone(),
        )
        .map_err(translate_core_error)?;
        self.transitions.push(result);
        Ok(self.current())
    }

    /// The targeted contribution.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation has no contribution scope.
    pub fn contribution_id(&self) -> Result<&ContributionId, ServiceError> {
        self.contribution
            .as_ref()
            .ok_or_else(|| ServiceError::validation("ERR-P0", "Missing parameter 'contribution'"))
    }

    /// The judgement slot selected by `current`.
    ///
    /// Reviewer judgements are the actor's own.
    ///
    /// # Errors
    ///
    /// Returns `ERR-REV7` if no valid judgement kind was given.
    pub fn judgement_slot(&self) -> Result<JudgementSlot, ServiceError> {
        match self.judgement {
            Some(ReviewRole::Referee) => Ok(JudgementSlot::Referee),
            Some(ReviewRole::Editor) => Ok(JudgementSlot::Editor),
            Some(ReviewRole::Reviewer) => Ok(JudgementSlot::Reviewer(self.actor.id.clone())),
            None => Err(ServiceError::validation(
                "ERR-REV7",
                "Current kind of judgement not specified",
            )),
        }
    }
}

/// Resolves, authorizes and runs operations against stored conferences.
pub struct Dispatcher {
    registry: Registry,
    notifier: Box<dyn Notifier + Send + Sync>,
}

impl Dispatcher {
    /// Creates a dispatcher delivering notifications to `notifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry fails its startup checks.
    pub fn new(notifier: Box<dyn Notifier + Send + Sync>) -> Result<Self, ServiceError> {
        Ok(Self {
            registry: Registry::new()?,
            notifier,
        })
    }

    /// Wire names of every registered operation.
    #[must_use]
    pub fn operations(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Operation::ALL
            .iter()
            .filter(|op| self.registry.get(**op).is_some())
            .map(Operation::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Runs one operation.
    ///
    /// # Arguments
    ///
    /// * `persistence` - Where the conference is loaded from and saved to
    /// * `request` - The call to run
    ///
    /// # Returns
    ///
    /// The JSON answer of the operation.
    ///
    /// # Errors
    ///
    /// Returns the first failure verbatim: unknown operation, missing or
    /// malformed parameters, denied access, rejected command or storage
    /// failure. Nothing is persisted when an error is returned.
    pub fn dispatch(
        &self,
        persistence: &mut Persistence,
        request: &OperationRequest,
    ) -> Result<Value, ServiceError> {
        let operation: Operation = request.method.parse()?;
        let spec: HandlerSpec = *self
            .registry
            .get(operation)
            .ok_or_else(|| ServiceError::unknown_operation(&request.method))?;
        let params: ParameterManager<'_> = ParameterManager::new(&request.params);
        let actor: &AuthenticatedActor = &request.actor;

        let conference_id: ConferenceId =
            ConferenceId::new(&params.required_scalar("conference")?)
                .map_err(translate_domain_error)?;
        let conference: Conference = persistence.load_conference(&conference_id)?;

        let mut contributions: Vec<ContributionId> = Vec::new();
        let mut contribution: Option<ContributionId> = None;
        let mut judgement: Option<ReviewRole> = None;
        let mut reviewing_disabled_code: Option<&'static str> = None;

        match spec.scope {
            Scope::Conference => reviewing_disabled_code = Some("ERR-REV1a"),
            Scope::Assignment => {
                let ids: Vec<String> = params
                    .required_list("contributions", false)
                    .map_err(missing_as("ERR-REV2"))?;
                for id in ids {
                    let id: ContributionId =
                        ContributionId::new(&id).map_err(translate_domain_error)?;
                    conference
                        .contribution(&id)
                        .map_err(translate_domain_error)?;
                    contributions.push(id);
                }
            }
            Scope::Contribution => {
                let id: ContributionId =
                    ContributionId::new(&params.required_scalar("contribution")?)
                        .map_err(translate_domain_error)?;
                conference
                    .contribution(&id)
                    .map_err(translate_domain_error)?;
                contribution = Some(id);
                judgement = params
                    .optional_str("current")?
                    .and_then(|kind| ReviewRole::from_judgement_kind(kind).ok());
                if !conference.paper_reviewing_enabled {
                    return Err(ServiceError::conflict(
                        "ERR-REV1b",
                        "Paper Reviewing is not active for this conference",
                    ));
                }
            }
            Scope::Attachments => {
                if params.has("contribution") {
                    let id: ContributionId =
                        ContributionId::new(&params.required_scalar("contribution")?)
                            .map_err(translate_domain_error)?;
                    conference
                        .contribution(&id)
                        .map_err(translate_domain_error)?;
                    contribution = Some(id);
                }
            }
        }

        if let Gate::Guarded(permission) = spec.gate {
            let ctx: PermissionContext<'_> = PermissionContext {
                conference: &conference,
                actor: &actor.id,
                contributions: &contributions,
                contribution: contribution.as_ref(),
                judgement,
                reviewing_disabled_code,
            };
            permission.check(&ctx)?;
        }

        let cause: Cause = Cause::new(
            format!("rpc-{:016x}", rand::random::<u64>()),
            format!("RPC {operation}"),
        );
        let mut ctx: HandlerContext<'_> = HandlerContext {
            operation,
            actor,
            params,
            contributions,
            contribution,
            judgement,
            state: State::new(conference),
            cause,
            transitions: Vec::new(),
        };
        let answer: Value = (spec.handler)(&mut ctx)?;

        for transition in &ctx.transitions {
            persistence.persist_transition(transition).map_err(|e| {
                error!(
                    method = %operation,
                    conference = %conference_id,
                    error = %e,
                    "Failed to persist transition"
                );
                ServiceError::from(e)
            })?;
        }
        for transition in &ctx.transitions {
            for notification in &transition.notifications {
                debug!(recipient = %notification.recipient(), "Delivering notification");
                self.notifier.deliver(notification);
            }
        }

        info!(
            method = %operation,
            actor = %actor.id,
            conference = %conference_id,
            transitions = ctx.transitions.len(),
            "Dispatched operation"
        );
        Ok(answer)
    }
}
