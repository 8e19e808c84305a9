//! Confidence scoring.

use adgen_models::{ConfidenceBreakdown, ExtractedParameters};

const PRODUCT_FOUND: f64 = 0.7;
const PRODUCT_MISSING: f64 = 0.4;
const STYLE_FOUND: f64 = 0.9;
const STYLE_MISSING: f64 = 0.6;
const FEASIBILITY_FLOOR: f64 = 0.5;
const PENALTY_PER_WARNING: f64 = 0.1;

const PRODUCT_WEIGHT: f64 = 0.3;
const STYLE_WEIGHT: f64 = 0.4;
const FEASIBILITY_WEIGHT: f64 = 0.3;

/// Overall score and its sub-scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confidence {
    pub score: f64,
    pub breakdown: ConfidenceBreakdown,
}

/// Score a parse from extraction completeness and warning count.
///
/// Holding `params` fixed, the score never increases with more warnings.
pub fn score(params: &ExtractedParameters, warning_count: usize) -> Confidence {
    let product_understanding = if params.has_product() {
        PRODUCT_FOUND
    } else {
        PRODUCT_MISSING
    };
    let style_clarity = if params.has_style_keywords() {
        STYLE_FOUND
    } else {
        STYLE_MISSING
    };
    let technical_feasibility =
        (1.0 - PENALTY_PER_WARNING * warning_count as f64).max(FEASIBILITY_FLOOR);

    let overall = PRODUCT_WEIGHT * product_understanding
        + STYLE_WEIGHT * style_clarity
        + FEASIBILITY_WEIGHT * technical_feasibility;

    Confidence {
        score: (overall * 100.0).round() / 100.0,
        breakdown: ConfidenceBreakdown {
            product_understanding,
            style_clarity,
            technical_feasibility,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(product: bool, style: bool) -> ExtractedParameters {
        ExtractedParameters {
            product_name: product.then(|| "sneakers".to_string()),
            style_keywords: if style { vec!["bold".to_string()] } else { vec![] },
            ..Default::default()
        }
    }

    #[test]
    fn test_full_extraction_no_warnings() {
        let confidence = score(&params(true, true), 0);
        assert_eq!(confidence.score, 0.87);
        assert_eq!(confidence.breakdown.technical_feasibility, 1.0);
    }

    #[test]
    fn test_sparse_extraction() {
        let confidence = score(&params(false, false), 1);
        // 0.3*0.4 + 0.4*0.6 + 0.3*0.9
        assert_eq!(confidence.score, 0.63);
        assert_eq!(confidence.breakdown.product_understanding, 0.4);
        assert_eq!(confidence.breakdown.style_clarity, 0.6);
    }

    #[test]
    fn test_feasibility_floor() {
        let confidence = score(&params(true, false), 12);
        assert_eq!(confidence.breakdown.technical_feasibility, 0.5);
    }

    #[test]
    fn test_monotonic_in_warnings() {
        for p in [params(true, true), params(false, true), params(true, false), params(false, false)] {
            let mut previous = f64::INFINITY;
            for warnings in 0..15 {
                let current = score(&p, warnings).score;
                assert!(current <= previous);
                previous = current;
            }
        }
    }
}
