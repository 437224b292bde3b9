use serde::Serialize;
use tera::{Context, Tera};

use triagem_core::models::result::ScoreResult;

use crate::error::ExportError;

/// Built-in analysis report.
pub const ANALYSIS_TEMPLATE: &str = r#"{{ instrument_name }}
Total score: {{ total_score }}/{{ max_score }} ({{ percentage_rounded }}%)
Risk level: {{ risk_label }}
Description: {{ interpretation }}

Recommendations:
{% for rec in recommendations %}• {{ rec }}
{% endfor %}{% if detailed_analysis %}
Subscale analysis:
{% for id, analysis in detailed_analysis %}{{ analysis.name }}: {{ analysis.score }}/{{ analysis.max_score }} - {{ analysis.description }}{% if analysis.approximate %} (approximate){% endif %}
{% for rec in analysis.recommendations %}  • {{ rec }}
{% endfor %}{% endfor %}{% endif %}
Scientific basis: {{ scientific_basis }}
"#;

const ANALYSIS_NAME: &str = "analysis";

/// Render a Tera template with any serializable value as its context.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// The fields of `value` become the template context variables.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    value: &T,
) -> Result<String, ExportError> {
    let context = Context::from_serialize(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    render_with_context(template_name, template_content, &context)
}

/// Render the built-in analysis report for `result`.
pub fn render_analysis(result: &ScoreResult) -> Result<String, ExportError> {
    render_with_template(ANALYSIS_NAME, ANALYSIS_TEMPLATE, result)
}

/// Render `result` with a caller-supplied template.
///
/// Besides the fields of [`ScoreResult`], the context carries
/// `percentage_rounded` and `risk_label`.
pub fn render_with_template(
    template_name: &str,
    template_content: &str,
    result: &ScoreResult,
) -> Result<String, ExportError> {
    let mut context = Context::from_value(serde_json::to_value(result)?)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    context.insert("percentage_rounded", &result.rounded_percentage());
    context.insert("risk_label", result.risk_level.label());

    let rendered = render_with_context(template_name, template_content, &context)?;
    tracing::debug!(
        session_id = %result.session_id,
        template = template_name,
        bytes = rendered.len(),
        "analysis rendered"
    );
    Ok(rendered)
}

fn render_with_context(
    template_name: &str,
    template_content: &str,
    context: &Context,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
    Ok(tera.render(template_name, context)?)
}
