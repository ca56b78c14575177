use std::borrow::Cow;

use serde::Serialize;
use utoipa::ToSchema;

/// Input cap for pipeline-style backends.
pub const PIPELINE_INPUT_TOKENS: usize = 512;
/// Tokenizer maximum of the T5-small checkpoints.
pub const T5_INPUT_TOKENS: usize = 512;
/// Tokenizer maximum of the DistilBART checkpoints.
pub const BART_INPUT_TOKENS: usize = 1024;

/// The five summarization models the service can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum ModelKind {
    FalconT5,
    DistilBartBase,
    T5SmallFineTuned,
    DistilBartFineTuned2,
    T5SmallFineTuned2,
}

/// How a backend interprets its length limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    /// Summarization pipeline: lengths count the whole output sequence.
    Pipeline,
    /// Raw `generate`: lengths count newly generated tokens only.
    Generate,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::FalconT5,
        ModelKind::DistilBartBase,
        ModelKind::T5SmallFineTuned,
        ModelKind::DistilBartFineTuned2,
        ModelKind::T5SmallFineTuned2,
    ];

    pub fn family(self) -> ModelFamily {
        match self {
            ModelKind::FalconT5 | ModelKind::DistilBartBase => ModelFamily::Pipeline,
            ModelKind::T5SmallFineTuned
            | ModelKind::DistilBartFineTuned2
            | ModelKind::T5SmallFineTuned2 => ModelFamily::Generate,
        }
    }

    /// Hosted checkpoint used when the registry is built from configuration.
    pub fn default_model_id(self) -> &'static str {
        match self {
            ModelKind::FalconT5 => "Falconsai/text_summarization",
            ModelKind::DistilBartBase => "sshleifer/distilbart-cnn-12-6",
            ModelKind::T5SmallFineTuned => "claradlnv/t5-small-fine-tune",
            ModelKind::DistilBartFineTuned2 => "claradlnv/distilbart-fine-tune",
            ModelKind::T5SmallFineTuned2 => "claradlnv/t5-small-fine-tune-2",
        }
    }

    /// Input cap: fixed for the pipeline family, the checkpoint's tokenizer
    /// maximum for generate-style backends.
    pub fn input_token_limit(self) -> usize {
        match self {
            ModelKind::FalconT5 | ModelKind::DistilBartBase => PIPELINE_INPUT_TOKENS,
            ModelKind::T5SmallFineTuned | ModelKind::T5SmallFineTuned2 => T5_INPUT_TOKENS,
            ModelKind::DistilBartFineTuned2 => BART_INPUT_TOKENS,
        }
    }

    /// Version identifier the kind is published under by default.
    pub fn default_version(self) -> &'static str {
        match self {
            ModelKind::FalconT5 => "v1",
            ModelKind::DistilBartBase => "v2",
            ModelKind::T5SmallFineTuned => "v3",
            ModelKind::DistilBartFineTuned2 => "v4",
            ModelKind::T5SmallFineTuned2 => "v5",
        }
    }
}

/// Output length window; the variant follows the backend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LengthControl {
    Total { min_length: u32, max_length: u32 },
    NewTokens { min_new_tokens: u32, max_new_tokens: u32 },
}

/// Fixed decoding policy applied to every call of one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPolicy {
    pub do_sample: bool,
    pub input_token_limit: usize,
    pub length: LengthControl,
}

impl GenerationPolicy {
    /// Deterministic decoding with the kind's input cap and its family's
    /// length semantics.
    pub fn for_kind(kind: ModelKind, min_length: u32, max_length: u32) -> Self {
        let length = match kind.family() {
            ModelFamily::Pipeline => LengthControl::Total {
                min_length,
                max_length,
            },
            ModelFamily::Generate => LengthControl::NewTokens {
                min_new_tokens: min_length,
                max_new_tokens: max_length,
            },
        };
        Self {
            do_sample: false,
            input_token_limit: kind.input_token_limit(),
            length,
        }
    }

    /// Cut `text` to the input limit. Tokens are approximated by whitespace
    /// separated words since the tokenizer lives with the remote model.
    pub fn truncate<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match text.split_whitespace().nth(self.input_token_limit) {
            None => Cow::Borrowed(text),
            Some(_) => Cow::Owned(
                text.split_whitespace()
                    .take(self.input_token_limit)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn families_follow_kind() {
        assert_eq!(ModelKind::FalconT5.family(), ModelFamily::Pipeline);
        assert_eq!(ModelKind::DistilBartBase.family(), ModelFamily::Pipeline);
        assert_eq!(ModelKind::T5SmallFineTuned.family(), ModelFamily::Generate);
        assert_eq!(ModelKind::DistilBartFineTuned2.family(), ModelFamily::Generate);
        assert_eq!(ModelKind::T5SmallFineTuned2.family(), ModelFamily::Generate);
    }

    #[test]
    fn default_versions_are_unique() {
        let versions: Vec<_> = ModelKind::ALL.iter().map(|k| k.default_version()).collect();
        let distinct: HashSet<_> = versions.iter().collect();
        assert_eq!(distinct.len(), ModelKind::ALL.len());
        assert_eq!(versions, vec!["v1", "v2", "v3", "v4", "v5"]);
    }

    #[test]
    fn input_limits_follow_checkpoint() {
        assert_eq!(ModelKind::FalconT5.input_token_limit(), 512);
        assert_eq!(ModelKind::DistilBartBase.input_token_limit(), 512);
        assert_eq!(ModelKind::T5SmallFineTuned.input_token_limit(), 512);
        assert_eq!(ModelKind::DistilBartFineTuned2.input_token_limit(), 1024);
        assert_eq!(ModelKind::T5SmallFineTuned2.input_token_limit(), 512);

        for kind in ModelKind::ALL {
            let policy = GenerationPolicy::for_kind(kind, 30, 500);
            assert_eq!(policy.input_token_limit, kind.input_token_limit());
        }
    }

    #[test]
    fn policy_length_semantics_differ_by_family() {
        let pipeline = GenerationPolicy::for_kind(ModelKind::FalconT5, 30, 500);
        assert!(!pipeline.do_sample);
        assert_eq!(pipeline.input_token_limit, 512);
        assert_eq!(
            pipeline.length,
            LengthControl::Total {
                min_length: 30,
                max_length: 500
            }
        );

        let generate = GenerationPolicy::for_kind(ModelKind::DistilBartFineTuned2, 30, 500);
        assert_eq!(generate.input_token_limit, 1024);
        assert_eq!(
            generate.length,
            LengthControl::NewTokens {
                min_new_tokens: 30,
                max_new_tokens: 500
            }
        );
    }

    #[test]
    fn truncates_long_input_only() {
        let mut policy = GenerationPolicy::for_kind(ModelKind::FalconT5, 30, 500);
        policy.input_token_limit = 3;

        assert!(matches!(policy.truncate("one two three"), Cow::Borrowed(_)));
        assert_eq!(policy.truncate("one  two three four five"), "one two three");
    }
}
