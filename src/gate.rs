//! Client-side consumption gating for training modules.
//!
//! [`ModuleGate`] mirrors one learner's position inside a module: which stages carry content,
//! which are already consumed, whether the learner confirmed readiness for the quiz, and the
//! last scored outcome. The gate enforces sequential consumption locally for immediate
//! feedback, while the backend stays the authority on recorded progress and scoring; every
//! mutation therefore also posts the matching endpoint.

// self
use crate::{
	_prelude::*,
	http::{ApiHttpClient, TransportErrorMapper},
	model::{
		AnswerId, ContentId, ContentKind, ModuleDetail, ModuleProgress, QuestionId, QuizOutcome,
		QuizReplies, QuizReply,
	},
	session::SessionManager,
};

/// Stages a learner moves through inside a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
	/// Video lesson stage.
	Video,
	/// PDF reading stage.
	Pdf,
	/// Quiz stage.
	Quiz,
}
impl Stage {
	/// Returns a stable label for messages and logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Stage::Video => "video",
			Stage::Pdf => "pdf",
			Stage::Quiz => "quiz",
		}
	}
}
impl Display for Stage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome of a quiz access request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizAccess {
	/// The quiz is open; the active stage moved to it.
	Granted,
	/// Every content stage is consumed but the learner still has to confirm readiness.
	ConfirmationRequired,
}

/// Gate-level rule violations, phrased as user guidance.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum GateError {
	/// The requested stage carries no consumable content.
	#[error("The {stage} stage has no content in this module.")]
	StageWithoutContent {
		/// Stage that was requested.
		stage: Stage,
	},
	/// A prior stage must be consumed first.
	#[error("The {stage} stage is locked until the previous content is consumed.")]
	StageLocked {
		/// Stage that was requested.
		stage: Stage,
	},
	/// The quiz stays locked until every content stage is consumed.
	#[error("Consume every content before starting the quiz.")]
	StagesIncomplete,
	/// The learner has not confirmed readiness for the quiz.
	#[error("Confirm you are ready before starting the quiz.")]
	ConfirmationPending,
	/// The answer sheet left questions unanswered.
	#[error("Answer every question before submitting; {missing} still unanswered.")]
	IncompleteAnswers {
		/// Number of questions without a selection.
		missing: usize,
	},
	/// The sheet references a question outside this module.
	#[error("Question {question} does not belong to this module.")]
	UnknownQuestion {
		/// Offending question identifier.
		question: QuestionId,
	},
	/// The sheet selects an answer outside the question's options.
	#[error("Answer {answer} is not an option of question {question}.")]
	UnknownAnswer {
		/// Question being answered.
		question: QuestionId,
		/// Offending answer identifier.
		answer: AnswerId,
	},
	/// The module has no quiz to submit.
	#[error("This module has no quiz questions.")]
	EmptyQuiz,
}

/// Learner's selected answers, at most one per question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerSheet(BTreeMap<QuestionId, AnswerId>);
impl AnswerSheet {
	/// Creates an empty sheet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Selects an answer for a question, replacing any previous selection.
	pub fn select(&mut self, question: QuestionId, answer: AnswerId) {
		self.0.insert(question, answer);
	}

	/// Returns the selection for a question, if any.
	pub fn selected(&self, question: QuestionId) -> Option<AnswerId> {
		self.0.get(&question).copied()
	}

	/// Iterates the selections in question order.
	pub fn entries(&self) -> impl Iterator<Item = (QuestionId, AnswerId)> + '_ {
		self.0.iter().map(|(question, answer)| (*question, *answer))
	}

	/// Returns the number of answered questions.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when no question has a selection.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

#[derive(Clone, Debug)]
struct StageSlot {
	content: ContentId,
	url: String,
	done: bool,
}

/// Per-module consumption state machine bound to one session.
///
/// Built by [`SessionManager::open_module`]; holds a clone of the session for its backend
/// calls, so a refresh or logout elsewhere applies to the gate's calls too.
pub struct ModuleGate<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	session: SessionManager<C, M>,
	module: ModuleDetail,
	video: Option<StageSlot>,
	pdf: Option<StageSlot>,
	ready_for_quiz: bool,
	active: Stage,
	last_outcome: Option<QuizOutcome>,
}
impl<C, M> ModuleGate<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn assemble(
		session: SessionManager<C, M>,
		module: ModuleDetail,
		progress: Option<&ModuleProgress>,
	) -> Self {
		let video = module.content_of(ContentKind::Video).map(|content| StageSlot {
			content: content.id,
			url: content.url.clone(),
			done: progress.is_some_and(|entry| entry.video_done),
		});
		let pdf = module.content_of(ContentKind::Pdf).map(|content| StageSlot {
			content: content.id,
			url: content.url.clone(),
			done: progress.is_some_and(|entry| entry.pdf_done),
		});
		let active = if video.is_some() {
			Stage::Video
		} else if pdf.is_some() {
			Stage::Pdf
		} else {
			Stage::Quiz
		};
		// A learner who already passed the quiz does not re-confirm to retake it.
		let ready_for_quiz = progress.is_some_and(|entry| entry.quiz_done);

		Self { session, module, video, pdf, ready_for_quiz, active, last_outcome: None }
	}

	/// Marks a content stage as consumed, posting the backend and advancing the active stage.
	///
	/// Already-consumed stages return without a network call. Under sequential consumption the
	/// active stage advances to the next pending one (video, pdf, quiz).
	pub async fn mark_consumed(&mut self, stage: Stage) -> Result<()> {
		let Some(slot) = self.slot(stage) else {
			return Err(GateError::StageWithoutContent { stage }.into());
		};

		if slot.done {
			return Ok(());
		}

		let content = slot.content;

		self.session.consume_content(self.module.id, content).await?;

		if let Some(slot) = self.slot_mut(stage) {
			slot.done = true;
		}

		self.session.notifier.success("Content marked as consumed.");

		if self.module.sequential_consumption {
			self.advance_from(stage);
		}

		Ok(())
	}

	/// Requests entry to the quiz stage.
	///
	/// Non-sequential modules grant immediately. Sequential modules demand every content stage
	/// consumed and then an explicit [`confirm_ready`](Self::confirm_ready) before granting.
	pub fn request_quiz_access(&mut self) -> Result<QuizAccess, GateError> {
		if !self.module.sequential_consumption {
			self.active = Stage::Quiz;

			return Ok(QuizAccess::Granted);
		}
		if !self.consumption_complete() {
			return Err(GateError::StagesIncomplete);
		}
		if !self.ready_for_quiz {
			return Ok(QuizAccess::ConfirmationRequired);
		}

		self.active = Stage::Quiz;

		Ok(QuizAccess::Granted)
	}

	/// Confirms the learner is ready, unlocking the quiz stage.
	pub fn confirm_ready(&mut self) -> Result<(), GateError> {
		if self.module.sequential_consumption && !self.consumption_complete() {
			return Err(GateError::StagesIncomplete);
		}

		self.ready_for_quiz = true;
		self.active = Stage::Quiz;
		self.session.notifier.success("Quiz unlocked. Good luck!");

		Ok(())
	}

	/// Jumps the active stage, enforcing sequential locks.
	pub fn select_stage(&mut self, stage: Stage) -> Result<(), GateError> {
		match stage {
			Stage::Video =>
				if self.video.is_none() {
					return Err(GateError::StageWithoutContent { stage });
				},
			Stage::Pdf => {
				if self.pdf.is_none() {
					return Err(GateError::StageWithoutContent { stage });
				}
				if self.module.sequential_consumption
					&& self.video.as_ref().is_some_and(|slot| !slot.done)
				{
					return Err(GateError::StageLocked { stage });
				}
			},
			Stage::Quiz =>
				if self.module.sequential_consumption {
					if !self.consumption_complete() {
						return Err(GateError::StagesIncomplete);
					}
					if !self.ready_for_quiz {
						return Err(GateError::ConfirmationPending);
					}
				},
		}

		self.active = stage;

		Ok(())
	}

	/// Validates the sheet locally, submits it for authoritative scoring, and stores the
	/// outcome.
	///
	/// Local validation rejects before any network call: empty quizzes, unmet sequential
	/// prerequisites, unanswered questions, and selections outside the module. Repeat
	/// submissions are allowed; each overwrites the stored outcome.
	pub async fn submit_quiz(&mut self, sheet: &AnswerSheet) -> Result<QuizOutcome> {
		if self.module.questions.is_empty() {
			return Err(GateError::EmptyQuiz.into());
		}
		if self.module.sequential_consumption {
			if !self.consumption_complete() {
				return Err(GateError::StagesIncomplete.into());
			}
			if !self.ready_for_quiz {
				return Err(GateError::ConfirmationPending.into());
			}
		}

		let mut replies = Vec::with_capacity(self.module.questions.len());
		let mut missing = 0_usize;

		for question in &self.module.questions {
			match sheet.selected(question.id) {
				Some(answer) => replies.push(QuizReply { question: question.id, answer }),
				None => missing += 1,
			}
		}

		if missing > 0 {
			return Err(GateError::IncompleteAnswers { missing }.into());
		}

		for (question, answer) in sheet.entries() {
			let Some(known) = self.module.question(question) else {
				return Err(GateError::UnknownQuestion { question }.into());
			};

			if !known.answers.iter().any(|option| option.id == answer) {
				return Err(GateError::UnknownAnswer { question, answer }.into());
			}
		}

		let outcome = self.session.submit_quiz(self.module.id, &QuizReplies { replies }).await?;

		self.last_outcome = Some(outcome);

		if outcome.approved {
			self.session.notifier.success(&format!(
				"Congratulations! You scored {}/{} and passed the quiz.",
				outcome.score, outcome.total
			));
		} else {
			self.session.notifier.info(&format!(
				"You scored {}/{}. Keep training and try again.",
				outcome.score, outcome.total
			));
		}

		Ok(outcome)
	}

	/// Returns `true` once every configured content stage is consumed.
	///
	/// A stage with no configured content is trivially done and never blocks.
	pub fn consumption_complete(&self) -> bool {
		let stage_done = |slot: &Option<StageSlot>| slot.as_ref().is_none_or(|slot| slot.done);

		stage_done(&self.video) && stage_done(&self.pdf)
	}

	/// Returns the locally computed completion percentage.
	///
	/// Each configured content stage counts as one step plus one for the quiz, which counts
	/// once readiness is confirmed or an outcome exists.
	pub fn progress_percent(&self) -> f64 {
		let mut total = 1_u32;
		let mut done = 0_u32;

		for slot in [self.video.as_ref(), self.pdf.as_ref()].into_iter().flatten() {
			total += 1;

			if slot.done {
				done += 1;
			}
		}
		if self.ready_for_quiz || self.last_outcome.is_some() {
			done += 1;
		}

		f64::from(done) / f64::from(total) * 100.0
	}

	/// Returns the stage the learner is currently on.
	pub fn active_stage(&self) -> Stage {
		self.active
	}

	/// Returns the module record backing this gate.
	pub fn module(&self) -> &ModuleDetail {
		&self.module
	}

	/// Returns the last stored quiz outcome, if any.
	pub fn outcome(&self) -> Option<QuizOutcome> {
		self.last_outcome
	}

	/// Returns the consumable URL of a stage, when configured.
	pub fn content_url(&self, stage: Stage) -> Option<&str> {
		self.slot(stage).map(|slot| slot.url.as_str())
	}

	/// Returns `true` when the stage has configured content.
	pub fn has_content(&self, stage: Stage) -> bool {
		self.slot(stage).is_some()
	}

	/// Returns `true` when the stage is done: consumed for contents, passed for the quiz.
	///
	/// Content stages without configured content are trivially done.
	pub fn is_done(&self, stage: Stage) -> bool {
		match stage {
			Stage::Quiz => self.last_outcome.is_some_and(|outcome| outcome.approved),
			_ => self.slot(stage).is_none_or(|slot| slot.done),
		}
	}

	/// Returns `true` once the learner confirmed readiness for the quiz.
	pub fn ready_for_quiz(&self) -> bool {
		self.ready_for_quiz
	}

	fn slot(&self, stage: Stage) -> Option<&StageSlot> {
		match stage {
			Stage::Video => self.video.as_ref(),
			Stage::Pdf => self.pdf.as_ref(),
			Stage::Quiz => None,
		}
	}

	fn slot_mut(&mut self, stage: Stage) -> Option<&mut StageSlot> {
		match stage {
			Stage::Video => self.video.as_mut(),
			Stage::Pdf => self.pdf.as_mut(),
			Stage::Quiz => None,
		}
	}

	fn advance_from(&mut self, stage: Stage) {
		self.active = match stage {
			Stage::Video if self.pdf.as_ref().is_some_and(|slot| !slot.done) => Stage::Pdf,
			Stage::Video | Stage::Pdf | Stage::Quiz => Stage::Quiz,
		};
	}
}
impl<C, M> Debug for ModuleGate<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ModuleGate")
			.field("module", &self.module.id)
			.field("active", &self.active)
			.field("ready_for_quiz", &self.ready_for_quiz)
			.finish()
	}
}
