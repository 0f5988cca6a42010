//! Result page rendering.

use stroke_contracts::assessment::RiskAssessment;

/// Disclaimer printed beneath every prediction.
pub const DISCLAIMER: &str =
    "This prediction is for educational purposes only and should not replace professional medical advice.";

/// Render the prediction result page.
pub fn render_result_page(assessment: &RiskAssessment) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Stroke Prediction Result</title>
</head>
<body>
    <div class="container">
        <h1 class="result-header">Stroke Risk Assessment Result</h1>
        <div class="risk-level {class}">{level}</div>
        <div class="probability">Risk Probability: {probability}%</div>
        <div class="recommendation">
            <strong>Recommendation:</strong><br>
            {recommendation}
        </div>
        <div class="buttons">
            <a href="/home" class="btn">New Prediction</a>
            <a href="/logout" class="btn">Logout</a>
        </div>
        <p class="disclaimer"><em>Disclaimer: {disclaimer}</em></p>
    </div>
</body>
</html>
"#,
        class = assessment.risk_level.css_class(),
        level = assessment.risk_level,
        probability = assessment.probability,
        recommendation = assessment.recommendation,
        disclaimer = DISCLAIMER,
    )
}
