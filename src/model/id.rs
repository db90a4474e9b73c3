//! Strongly typed identifiers for backend records.

// self
use crate::_prelude::*;

macro_rules! def_numeric_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub u64);
		impl $name {
			/// Returns the raw numeric value.
			pub const fn value(self) -> u64 {
				self.0
			}
		}
		impl From<u64> for $name {
			fn from(value: u64) -> Self {
				Self(value)
			}
		}
		impl From<$name> for u64 {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				Display::fmt(&self.0, f)
			}
		}
		impl FromStr for $name {
			type Err = std::num::ParseIntError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				s.parse::<u64>().map(Self)
			}
		}
	};
}

def_numeric_id! { ModuleId, "Identifier of a training module.", "Module" }
def_numeric_id! { ContentId, "Identifier of a content item inside a module.", "Content" }
def_numeric_id! { QuestionId, "Identifier of a quiz question.", "Question" }
def_numeric_id! { AnswerId, "Identifier of a quiz answer option.", "Answer" }
def_numeric_id! { UserId, "Identifier for a backend account.", "User" }
