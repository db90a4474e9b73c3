//! Module catalog models, quiz structure, and the authoring payloads.

// self
use crate::{
	_prelude::*,
	model::{AnswerId, ContentId, ModuleId, QuestionId},
};

/// Kind of consumable content inside a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
	/// Video lesson.
	#[serde(rename = "VIDEO")]
	Video,
	/// PDF handout.
	#[serde(rename = "PDF")]
	Pdf,
}
impl ContentKind {
	/// Returns the wire representation.
	pub const fn as_str(self) -> &'static str {
		match self {
			ContentKind::Video => "VIDEO",
			ContentKind::Pdf => "PDF",
		}
	}
}
impl Display for ContentKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One consumable content item of a module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleContent {
	/// Content identifier.
	pub id: ContentId,
	/// Content kind.
	#[serde(rename = "tipo")]
	pub kind: ContentKind,
	/// Location of the asset. An empty string means the stage is not configured.
	#[serde(default)]
	pub url: String,
	/// Optional display title.
	#[serde(default, rename = "titulo", skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Ordering hint inside the module.
	#[serde(default, rename = "ordem", skip_serializing_if = "Option::is_none")]
	pub position: Option<u32>,
}

/// Answer option of a quiz question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizAnswer {
	/// Answer identifier.
	pub id: AnswerId,
	/// Answer text.
	#[serde(rename = "texto")]
	pub text: String,
	/// Whether the option is the correct one. Learner-facing payloads omit it.
	#[serde(default, rename = "correta")]
	pub correct: bool,
}

/// Quiz question with its answer options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
	/// Question identifier.
	pub id: QuestionId,
	/// Question text.
	#[serde(rename = "titulo")]
	pub title: String,
	/// Ordering hint inside the quiz.
	#[serde(default, rename = "ordem", skip_serializing_if = "Option::is_none")]
	pub position: Option<u32>,
	/// Answer options.
	#[serde(default, rename = "respostas")]
	pub answers: Vec<QuizAnswer>,
}

/// Full module record returned by the detail endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleDetail {
	/// Module identifier.
	pub id: ModuleId,
	/// Module title.
	#[serde(rename = "titulo")]
	pub title: String,
	/// Free-form description.
	#[serde(default, rename = "descricao", skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether the module is visible to learners.
	#[serde(default = "default_true", rename = "ativo")]
	pub active: bool,
	/// Whether learners must consume every content before the quiz unlocks.
	#[serde(default, rename = "exigir_consumo_antes_quiz")]
	pub sequential_consumption: bool,
	/// Consumable contents.
	#[serde(default, rename = "conteudos")]
	pub contents: Vec<ModuleContent>,
	/// Quiz questions.
	#[serde(default, rename = "perguntas")]
	pub questions: Vec<QuizQuestion>,
	/// Creation timestamp.
	#[serde(default, rename = "criado_em", with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Last update timestamp.
	#[serde(default, rename = "atualizado_em", with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
}
impl ModuleDetail {
	/// Returns the first content of the given kind that carries a non-empty URL.
	pub fn content_of(&self, kind: ContentKind) -> Option<&ModuleContent> {
		self.contents.iter().find(|content| content.kind == kind && !content.url.is_empty())
	}

	/// Looks up a question by identifier.
	pub fn question(&self, id: QuestionId) -> Option<&QuizQuestion> {
		self.questions.iter().find(|question| question.id == id)
	}
}

/// Module row returned by the catalog listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleSummary {
	/// Module identifier.
	pub id: ModuleId,
	/// Module title.
	#[serde(rename = "titulo")]
	pub title: String,
	/// Free-form description.
	#[serde(default, rename = "descricao", skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether the module is visible to learners.
	#[serde(default = "default_true", rename = "ativo")]
	pub active: bool,
	/// Whether learners must consume every content before the quiz unlocks.
	#[serde(default, rename = "exigir_consumo_antes_quiz")]
	pub sequential_consumption: bool,
	/// Creation timestamp.
	#[serde(default, rename = "criado_em", with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
}

/// Payload for creating a module with its contents and quiz in one call.
#[derive(Clone, Debug, Serialize)]
pub struct ModuleDraft {
	/// Module title.
	#[serde(rename = "titulo")]
	pub title: String,
	/// Free-form description.
	#[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Content locations.
	#[serde(rename = "conteudos")]
	pub contents: DraftContents,
	/// Consumption rules.
	#[serde(rename = "regras")]
	pub rules: DraftRules,
	/// Quiz definition.
	pub quiz: DraftQuiz,
}
impl ModuleDraft {
	/// Starts a draft with the given title, no contents, and an empty quiz.
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			description: None,
			contents: DraftContents::default(),
			rules: DraftRules::default(),
			quiz: DraftQuiz::default(),
		}
	}

	/// Sets the description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the video URL.
	pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
		self.contents.video_url = Some(url.into());

		self
	}

	/// Sets the PDF URL.
	pub fn with_pdf_url(mut self, url: impl Into<String>) -> Self {
		self.contents.pdf_url = Some(url.into());

		self
	}

	/// Requires every content to be consumed before the quiz unlocks.
	pub fn with_sequential_consumption(mut self, required: bool) -> Self {
		self.rules.sequential_consumption = required;

		self
	}

	/// Appends a quiz question.
	pub fn with_question(mut self, question: DraftQuestion) -> Self {
		self.quiz.questions.push(question);

		self
	}
}

/// Content locations of a module draft.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DraftContents {
	/// Video URL, when the module ships a video stage.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub video_url: Option<String>,
	/// PDF URL, when the module ships a reading stage.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pdf_url: Option<String>,
}

/// Consumption rules of a module draft.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DraftRules {
	/// Whether learners must consume every content before the quiz unlocks.
	#[serde(rename = "exigir_consumo_antes_quiz")]
	pub sequential_consumption: bool,
}

/// Quiz definition of a module draft.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DraftQuiz {
	/// Questions in presentation order.
	#[serde(rename = "perguntas")]
	pub questions: Vec<DraftQuestion>,
}

/// Question inside a module draft.
#[derive(Clone, Debug, Serialize)]
pub struct DraftQuestion {
	/// Question text.
	#[serde(rename = "titulo")]
	pub title: String,
	/// Answer options.
	#[serde(rename = "respostas")]
	pub answers: Vec<DraftAnswer>,
}
impl DraftQuestion {
	/// Builds a question from its text and options.
	pub fn new(title: impl Into<String>, answers: impl IntoIterator<Item = DraftAnswer>) -> Self {
		Self { title: title.into(), answers: answers.into_iter().collect() }
	}
}

/// Answer option inside a module draft.
#[derive(Clone, Debug, Serialize)]
pub struct DraftAnswer {
	/// Answer text.
	#[serde(rename = "texto")]
	pub text: String,
	/// Whether the option is the correct one.
	#[serde(rename = "correta")]
	pub correct: bool,
}
impl DraftAnswer {
	/// Builds an answer option.
	pub fn new(text: impl Into<String>, correct: bool) -> Self {
		Self { text: text.into(), correct }
	}
}

/// Partial module update sent as `PATCH`; unset fields stay untouched on the backend.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ModuleUpdate {
	/// Replacement title.
	#[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Replacement description.
	#[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Replacement visibility flag.
	#[serde(rename = "ativo", skip_serializing_if = "Option::is_none")]
	pub active: Option<bool>,
	/// Replacement sequential-consumption flag.
	#[serde(rename = "exigir_consumo_antes_quiz", skip_serializing_if = "Option::is_none")]
	pub sequential_consumption: Option<bool>,
}
impl ModuleUpdate {
	/// Starts an empty update.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the title.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());

		self
	}

	/// Sets the description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the visibility flag.
	pub fn with_active(mut self, active: bool) -> Self {
		self.active = Some(active);

		self
	}

	/// Sets the sequential-consumption flag.
	pub fn with_sequential_consumption(mut self, required: bool) -> Self {
		self.sequential_consumption = Some(required);

		self
	}
}

fn default_true() -> bool {
	true
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn detail_decodes_wire_field_names() {
		let detail = serde_json::from_str::<ModuleDetail>(
			r#"{
				"id": 3,
				"titulo": "Funil de vendas",
				"descricao": "Do primeiro contato ao fechamento.",
				"exigir_consumo_antes_quiz": true,
				"conteudos": [
					{"id": 10, "tipo": "VIDEO", "url": "https://cdn.example/v.mp4", "ordem": 1},
					{"id": 11, "tipo": "PDF", "url": "", "titulo": "Apostila"}
				],
				"perguntas": [
					{
						"id": 20,
						"titulo": "Qual etapa vem primeiro?",
						"respostas": [
							{"id": 30, "texto": "Prospecção"},
							{"id": 31, "texto": "Fechamento"}
						]
					}
				],
				"criado_em": "2024-04-02T12:30:00Z"
			}"#,
		)
		.expect("Detail fixture should decode.");

		assert!(detail.active, "Visibility should default to true when omitted.");
		assert!(detail.sequential_consumption);
		assert_eq!(detail.questions[0].answers.len(), 2);
		assert!(detail.created_at.is_some());
		assert!(detail.updated_at.is_none());
	}

	#[test]
	fn content_lookup_requires_a_url() {
		let detail = serde_json::from_str::<ModuleDetail>(
			r#"{
				"id": 3,
				"titulo": "Funil de vendas",
				"conteudos": [
					{"id": 10, "tipo": "VIDEO", "url": "https://cdn.example/v.mp4"},
					{"id": 11, "tipo": "PDF", "url": ""}
				]
			}"#,
		)
		.expect("Detail fixture should decode.");

		assert_eq!(detail.content_of(ContentKind::Video).map(|content| content.id), Some(ContentId(10)));
		assert!(detail.content_of(ContentKind::Pdf).is_none(), "Empty URLs are unconfigured stages.");
	}

	#[test]
	fn draft_serializes_the_nested_authoring_shape() {
		let draft = ModuleDraft::new("Objeções comuns")
			.with_video_url("https://cdn.example/objecoes.mp4")
			.with_sequential_consumption(true)
			.with_question(DraftQuestion::new("Cliente pede desconto. E agora?", [
				DraftAnswer::new("Cede imediatamente", false),
				DraftAnswer::new("Reforça o valor antes de negociar", true),
			]));
		let payload = serde_json::to_value(&draft).expect("Draft should serialize.");

		assert_eq!(
			payload,
			serde_json::json!({
				"titulo": "Objeções comuns",
				"conteudos": {"video_url": "https://cdn.example/objecoes.mp4"},
				"regras": {"exigir_consumo_antes_quiz": true},
				"quiz": {
					"perguntas": [{
						"titulo": "Cliente pede desconto. E agora?",
						"respostas": [
							{"texto": "Cede imediatamente", "correta": false},
							{"texto": "Reforça o valor antes de negociar", "correta": true}
						]
					}]
				}
			})
		);
	}

	#[test]
	fn update_serializes_only_set_fields() {
		let update = ModuleUpdate::new().with_active(false);
		let payload = serde_json::to_value(&update).expect("Update should serialize.");

		assert_eq!(payload, serde_json::json!({"ativo": false}));
	}
}
