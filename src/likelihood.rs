//! Output of the upstream AI-likelihood detector.

use serde::{Deserialize, Serialize};

use crate::confidence::SourceType;

/// Raw likelihood score and metadata handed to the trust pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodReport {
    /// 0-100, probability the content is machine-generated
    pub score: f64,
    /// Detector verdict; derived from the score when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    #[serde(default)]
    pub source_type: SourceType,
    /// Per-unit scores (frames, pages)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<f64>,
    /// No real detector signal stands behind the score
    #[serde(default)]
    pub degraded: bool,
}

impl LikelihoodReport {
    pub fn new(score: f64, source_type: SourceType) -> Self {
        Self {
            score: score.clamp(0.0, 100.0),
            verdict: None,
            source_type,
            signals: Vec::new(),
            degraded: false,
        }
    }

    /// Average per-unit scores into one report, keeping the signals.
    ///
    /// With no signals the score is 0 and the report is degraded.
    pub fn from_signals(source_type: SourceType, signals: Vec<f64>) -> Self {
        let finite: Vec<f64> = signals.into_iter().filter(|s| s.is_finite()).collect();
        if finite.is_empty() {
            return Self::new(0.0, source_type).with_degraded(true);
        }
        let mean = finite.iter().sum::<f64>() / finite.len() as f64;
        let mut report = Self::new(mean, source_type);
        report.signals = finite;
        report
    }

    /// Placeholder report used when the detector has no credentials.
    pub fn dev_mode(source_type: SourceType) -> Self {
        let verdict = match source_type {
            SourceType::Image => "Likely Real (Dev Mode - No API Key)",
            _ => "Likely Human (Dev Mode - No API Key)",
        };
        Self::new(0.0, source_type)
            .with_verdict(verdict)
            .with_degraded(true)
    }

    pub fn with_verdict(mut self, verdict: impl Into<String>) -> Self {
        self.verdict = Some(verdict.into());
        self
    }

    pub fn with_degraded(mut self, degraded: bool) -> Self {
        self.degraded = degraded;
        self
    }

    /// Detector verdict, or the default one for this score and content type.
    pub fn resolved_verdict(&self) -> String {
        self.verdict
            .clone()
            .unwrap_or_else(|| default_verdict(self.score, self.source_type).to_string())
    }
}

/// Verdict for a likelihood score when the detector supplied none.
pub fn default_verdict(score: f64, source_type: SourceType) -> &'static str {
    match source_type {
        SourceType::Text | SourceType::File => {
            if score > 80.0 {
                "Highly Likely AI-Generated"
            } else if score > 50.0 {
                "Likely AI-Generated"
            } else {
                "Likely Human-Written"
            }
        }
        SourceType::Image => {
            if score > 85.0 {
                "Highly Likely AI-Generated"
            } else if score > 50.0 {
                "Likely AI-Generated"
            } else {
                "Likely Real Image"
            }
        }
        SourceType::Video => {
            if score > 80.0 {
                "Highly Likely Deepfake/AI Video"
            } else if score > 50.0 {
                "Potential Deepfake"
            } else {
                "Likely Authentic Video"
            }
        }
    }
}
