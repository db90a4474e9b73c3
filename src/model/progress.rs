//! Learner progress, quiz submission, and aggregate metrics models.

// self
use crate::{
	_prelude::*,
	model::{AnswerId, ModuleId, QuestionId, UserId},
};

/// Learner-facing progress row for one module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleProgress {
	/// Module identifier.
	pub id: ModuleId,
	/// Module title.
	#[serde(rename = "titulo")]
	pub title: String,
	/// Free-form description.
	#[serde(default, rename = "descricao", skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether contents must be consumed before the quiz.
	#[serde(default, rename = "exigir_consumo_antes_quiz")]
	pub sequential_consumption: bool,
	/// Whether the learner finished the module.
	#[serde(default, rename = "concluido")]
	pub completed: bool,
	/// Completion percentage reported by the backend.
	#[serde(default, rename = "progresso_percent")]
	pub progress_percent: f64,
	/// Whether the video stage was consumed.
	#[serde(default, rename = "video_ok")]
	pub video_done: bool,
	/// Whether the reading stage was consumed.
	#[serde(default, rename = "pdf_ok")]
	pub pdf_done: bool,
	/// Whether the quiz was passed.
	#[serde(default, rename = "quiz_ok")]
	pub quiz_done: bool,
	/// Recorded quiz score, absent until the learner answers.
	#[serde(default, rename = "score_quiz", skip_serializing_if = "Option::is_none")]
	pub quiz_score: Option<f64>,
}

/// One selected answer inside a quiz submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QuizReply {
	/// Question being answered.
	#[serde(rename = "pergunta_id")]
	pub question: QuestionId,
	/// Selected answer option.
	#[serde(rename = "resposta_id")]
	pub answer: AnswerId,
}

/// Quiz submission payload.
#[derive(Clone, Debug, Default, Serialize)]
pub struct QuizReplies {
	/// Selected answers in question order.
	#[serde(rename = "respostas")]
	pub replies: Vec<QuizReply>,
}

/// Scored quiz result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct QuizOutcome {
	/// Number of correct answers.
	pub score: u32,
	/// Number of questions scored.
	pub total: u32,
	/// Whether the backend considers the quiz passed.
	#[serde(rename = "aprovado")]
	pub approved: bool,
}

/// Aggregate consumption metrics for one module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetrics {
	/// Module identifier.
	#[serde(rename = "modulo_id")]
	pub module: ModuleId,
	/// Module title.
	#[serde(rename = "titulo")]
	pub title: String,
	/// Salespeople assigned to the module.
	#[serde(default, rename = "total_usuarios")]
	pub total_users: u64,
	/// Salespeople who completed it.
	#[serde(default, rename = "concluidos")]
	pub completed_users: u64,
	/// Mean quiz score, absent until someone answers.
	#[serde(default, rename = "media_score_quiz", skip_serializing_if = "Option::is_none")]
	pub average_quiz_score: Option<f64>,
	/// Per-learner breakdown.
	#[serde(default, rename = "usuarios")]
	pub users: Vec<LearnerMetrics>,
}

/// Per-learner row inside [`ModuleMetrics`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearnerMetrics {
	/// Account identifier.
	pub id: UserId,
	/// Display name.
	#[serde(rename = "nome")]
	pub name: String,
	/// Whether the learner finished the module.
	#[serde(default, rename = "concluido")]
	pub completed: bool,
	/// Completion percentage reported by the backend.
	#[serde(default, rename = "progresso_percent")]
	pub progress_percent: f64,
	/// Whether the video stage was consumed.
	#[serde(default, rename = "video_ok")]
	pub video_done: bool,
	/// Whether the reading stage was consumed.
	#[serde(default, rename = "pdf_ok")]
	pub pdf_done: bool,
	/// Whether the quiz was passed.
	#[serde(default, rename = "quiz_ok")]
	pub quiz_done: bool,
	/// Recorded quiz score, when the learner already answered.
	#[serde(default, rename = "score_quiz", skip_serializing_if = "Option::is_none")]
	pub quiz_score: Option<f64>,
	/// Moment of the learner's last recorded activity.
	#[serde(default, rename = "ultima_atividade", with = "time::serde::rfc3339::option")]
	pub last_activity: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn outcome_decodes_wire_field_names() {
		let outcome = serde_json::from_str::<QuizOutcome>(
			r#"{"score": 2, "total": 3, "aprovado": false}"#,
		)
		.expect("Outcome fixture should decode.");

		assert_eq!(outcome, QuizOutcome { score: 2, total: 3, approved: false });
	}

	#[test]
	fn replies_serialize_wire_field_names() {
		let replies = QuizReplies {
			replies: vec![QuizReply { question: QuestionId(1), answer: AnswerId(4) }],
		};
		let payload = serde_json::to_value(&replies).expect("Replies should serialize.");

		assert_eq!(
			payload,
			serde_json::json!({"respostas": [{"pergunta_id": 1, "resposta_id": 4}]})
		);
	}

	#[test]
	fn metrics_tolerate_a_null_average() {
		let metrics = serde_json::from_str::<ModuleMetrics>(
			r#"{
				"modulo_id": 5,
				"titulo": "Pós-venda",
				"total_usuarios": 12,
				"concluidos": 0,
				"media_score_quiz": null,
				"usuarios": [{
					"id": 7,
					"nome": "Ana Souza",
					"progresso_percent": 50.0,
					"video_ok": true,
					"ultima_atividade": "2024-05-01T09:00:00Z"
				}]
			}"#,
		)
		.expect("Metrics fixture should decode.");

		assert_eq!(metrics.average_quiz_score, None);
		assert_eq!(metrics.users[0].id, UserId(7));
		assert!(metrics.users[0].last_activity.is_some());
		assert!(!metrics.users[0].quiz_done);
	}
}
