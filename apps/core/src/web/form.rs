//! Server-rendered pages.

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;
use tracing::info_span;
use uuid::Uuid;

use crate::context::AppContext;
use crate::error::AppError;
use crate::sentiment::{LexiconCategory, LexiconPrediction};

const REVIEW_PAGE: &str = include_str!("../../assets/review.html");

pub const EMPTY_INPUT_WARNING: &str = "Please enter some text to analyze.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeForm {
    pub text: String,
}

/// `GET /`
pub async fn review_page() -> Html<&'static str> {
    Html(REVIEW_PAGE)
}

/// `GET /analyzer`
pub async fn analyzer_page() -> Html<String> {
    Html(render_page("", ""))
}

/// `POST /analyzer` with a form-encoded `text` field.
pub async fn analyze_form(
    State(context): State<AppContext>,
    form: Result<Form<AnalyzeForm>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let text = form.map(|Form(f)| f.text).unwrap_or_default();
    let request_id = Uuid::new_v4();

    let span = info_span!("analyze_form", request_id = %request_id);
    let outcome = span.in_scope(|| context.service.predict_lexicon(&text));

    let (status, panel) = match outcome {
        Ok(prediction) => (StatusCode::OK, render_result(&prediction)),
        Err(AppError::Validation(_)) => (StatusCode::OK, render_warning(EMPTY_INPUT_WARNING)),
        Err(err) => (err.status_code(), render_error(&err)),
    };
    (status, Html(render_page(&text, &panel)))
}

fn style_class(category: LexiconCategory) -> &'static str {
    match category {
        LexiconCategory::Positive => "positive",
        LexiconCategory::Negative => "negative",
        LexiconCategory::Neutral => "neutral",
    }
}

fn render_result(prediction: &LexiconPrediction) -> String {
    let scores = &prediction.scores;
    format!(
        r#"<div class="results-box {class}">
  <h3 class="sentiment-title">Overall Sentiment: {category}</h3>
  <ul class="score-list">
    <li><strong>Positive Score:</strong> {pos:.2}</li>
    <li><strong>Negative Score:</strong> {neg:.2}</li>
    <li><strong>Neutral Score:</strong> {neu:.2}</li>
    <li><strong>Compound Score:</strong> {compound:.2}</li>
  </ul>
</div>"#,
        class = style_class(prediction.category),
        category = prediction.category,
        pos = scores.pos,
        neg = scores.neg,
        neu = scores.neu,
        compound = scores.compound,
    )
}

fn render_warning(message: &str) -> String {
    format!(r#"<div class="warning">{}</div>"#, escape_html(message))
}

fn render_error(err: &AppError) -> String {
    format!(r#"<div class="error">{}</div>"#, escape_html(&err.to_string()))
}

fn render_page(text: &str, panel: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Sentiment Analyzer</title>
<style>
  body {{ font-family: sans-serif; max-width: 40em; margin: 2em auto; background: #f0f2f6; }}
  h1 {{ text-align: center; color: #1a1a1a; }}
  textarea {{ width: 100%; height: 150px; }}
  button {{ width: 100%; border-radius: 25px; padding: 10px 0; font-weight: bold; color: white; background-color: #4CAF50; border: none; }}
  .results-box {{ margin-top: 2em; padding: 1.5em; border-radius: 15px; }}
  .positive {{ background-color: #e6ffed; color: #1f782c; border: 2px solid #1f782c; }}
  .negative {{ background-color: #ffeded; color: #b33939; border: 2px solid #b33939; }}
  .neutral {{ background-color: #f0f3ff; color: #2e59a8; border: 2px solid #2e59a8; }}
  .warning {{ margin-top: 2em; padding: 1em; background: #fff8e1; color: #8a6d00; }}
  .error {{ margin-top: 2em; padding: 1em; background: #ffeded; color: #b33939; }}
</style>
</head>
<body>
<h1>Sentiment Analysis</h1>
<p>Enter some text below to get the sentiment analysis results.</p>
<form method="post" action="/analyzer">
  <label for="text">Enter your text here:</label>
  <textarea id="text" name="text">{text}</textarea>
  <button type="submit">Analyze</button>
</form>
{panel}
</body>
</html>
"#,
        text = escape_html(text),
        panel = panel,
    )
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
