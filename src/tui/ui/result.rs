//! Prediction result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::{PredictionOutcome, RiskStatus, SubmissionState};
use crate::tui::styles::ClinicTheme;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the result screen for the current submission state.
///
/// `notice` carries transient feedback (e.g. where the report was saved);
/// `tick` drives the pending spinner.
pub fn render_result(
    f: &mut Frame,
    area: Rect,
    state: &SubmissionState,
    notice: Option<&str>,
    tick: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        SubmissionState::Idle | SubmissionState::Pending => render_pending(f, chunks[1], tick),
        SubmissionState::Succeeded(outcome) => render_outcome(f, chunks[1], outcome, notice),
        SubmissionState::Failed(message) => render_error(f, chunks[1], message),
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled("Prediction Results", ClinicTheme::title()),
        Span::styled(" │ Heart Disease Risk", ClinicTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_pending(f: &mut Frame, area: Rect, tick: usize) {
    let frame = SPINNER_FRAMES[tick % SPINNER_FRAMES.len()];
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{frame} Analyzing..."),
            ClinicTheme::info(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Contacting the prediction service",
            ClinicTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_outcome(f: &mut Frame, area: Rect, outcome: &PredictionOutcome, notice: Option<&str>) {
    let block = Block::default()
        .title(Span::styled(" Risk Assessment ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Risk banner
            Constraint::Length(4), // Probability gauge
            Constraint::Length(2), // BMI
            Constraint::Length(3), // Advisory
            Constraint::Min(0),    // Notice
        ])
        .margin(1)
        .split(inner);

    let status = outcome.risk_status();
    let risk_style = ClinicTheme::risk(status);

    let banner = Paragraph::new(vec![
        Line::from(Span::styled("Risk Status", ClinicTheme::text_secondary())),
        Line::from(Span::styled(
            status.label(),
            risk_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(banner, chunks[0]);

    let prob_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " Risk Probability ",
                    ClinicTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(ClinicTheme::border()),
        )
        .gauge_style(risk_style)
        .percent((outcome.risk_probability * 100.0).clamp(0.0, 100.0) as u16)
        .label(outcome.probability_percent());
    f.render_widget(prob_gauge, chunks[1]);

    let bmi = Paragraph::new(Line::from(vec![
        Span::styled("Your BMI: ", ClinicTheme::text_secondary()),
        Span::styled(format!("{}", outcome.bmi), ClinicTheme::text()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(bmi, chunks[2]);

    if status == RiskStatus::High {
        let advisory = Paragraph::new(Line::from(Span::styled(
            "You may have an elevated risk of heart disease. Please consult \
             a healthcare professional for a comprehensive evaluation.",
            ClinicTheme::danger(),
        )))
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });
        f.render_widget(advisory, chunks[3]);
    }

    if let Some(notice) = notice {
        let line = Paragraph::new(Line::from(Span::styled(
            notice.to_string(),
            ClinicTheme::success(),
        )))
        .alignment(Alignment::Center);
        f.render_widget(line, chunks[4]);
    }
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Prediction failed", ClinicTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), ClinicTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ClinicTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &SubmissionState) {
    let content = match state {
        SubmissionState::Succeeded(_) => Line::from(vec![
            Span::styled("[D] ", ClinicTheme::key_hint()),
            Span::styled("Download Report ", ClinicTheme::key_desc()),
            Span::styled("[N] ", ClinicTheme::key_hint()),
            Span::styled("New Screening ", ClinicTheme::key_desc()),
            Span::styled("[Esc] ", ClinicTheme::key_hint()),
            Span::styled("Back to Form", ClinicTheme::key_desc()),
        ]),
        SubmissionState::Failed(_) => Line::from(vec![
            Span::styled("[Enter] ", ClinicTheme::key_hint()),
            Span::styled("Edit & Retry ", ClinicTheme::key_desc()),
            Span::styled("[Esc] ", ClinicTheme::key_hint()),
            Span::styled("Back to Form", ClinicTheme::key_desc()),
        ]),
        _ => Line::from(vec![Span::styled(
            "Analyzing...",
            ClinicTheme::text_muted(),
        )]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn out_of_range_probability_renders_without_panicking() {
        // A misbehaving service may report a probability above 1.0; the
        // gauge percentage must stay clamped.
        let state = SubmissionState::Succeeded(PredictionOutcome {
            heart_risk: 1,
            risk_probability: 1.2,
            bmi: 24.5,
        });

        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|f| render_result(f, f.area(), &state, None, 0))
            .expect("draw");
    }
}
