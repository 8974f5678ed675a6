//! Health information intake form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::IntakeRecord;
use crate::tui::styles::ClinicTheme;

const GENDER_OPTIONS: &[&str] = &["Male", "Female"];
const LEVEL_OPTIONS: &[&str] = &["Normal", "Border-Line", "High"];
const YES_NO_OPTIONS: &[&str] = &["Yes", "No"];

/// What kind of input a form field accepts.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Free-typed numeric string
    Numeric,
    /// One of a fixed set of labels, cycled with arrow keys
    Choice(&'static [&'static str]),
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl FormField {
    fn numeric(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Numeric,
            value: String::new(),
        }
    }

    fn choice(label: &'static str, hint: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Choice(options),
            value: String::new(),
        }
    }
}

/// Intake form state
pub struct IntakeFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for IntakeFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField::numeric("Age", "years, e.g. 45"),
                FormField::choice("Gender", "Male / Female", GENDER_OPTIONS),
                FormField::numeric("Height", "cm, e.g. 170"),
                FormField::numeric("Weight", "kg, e.g. 75"),
                FormField::numeric("Systolic BP", "mm Hg, e.g. 120"),
                FormField::numeric("Diastolic BP", "mm Hg, e.g. 80"),
                FormField::choice("Cholesterol", "Normal / Border-Line / High", LEVEL_OPTIONS),
                FormField::choice("Glucose", "Normal / Border-Line / High", LEVEL_OPTIONS),
                FormField::choice("Smoking", "Yes / No", YES_NO_OPTIONS),
                FormField::choice("Alcohol", "Yes / No", YES_NO_OPTIONS),
                FormField::choice("Physical Activity", "Yes / No", YES_NO_OPTIONS),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl IntakeFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field (numeric fields only).
    /// Any edit clears the visible error.
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        if matches!(field.kind, FieldKind::Numeric) && (c.is_ascii_digit() || c == '.') {
            field.value.push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character of the current field
    pub fn delete_char(&mut self) {
        if matches!(self.fields[self.selected_field].kind, FieldKind::Numeric) {
            self.fields[self.selected_field].value.pop();
            self.error_message = None;
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
        self.error_message = None;
    }

    /// Cycle a choice field forward (no-op on numeric fields).
    pub fn cycle_next(&mut self) {
        self.cycle(1);
    }

    /// Cycle a choice field backward.
    pub fn cycle_prev(&mut self) {
        self.cycle(-1);
    }

    fn cycle(&mut self, direction: isize) {
        let field = &mut self.fields[self.selected_field];
        let FieldKind::Choice(options) = field.kind else {
            return;
        };

        let len = options.len() as isize;
        let current = options
            .iter()
            .position(|o| *o == field.value)
            .map(|i| i as isize);
        let next = match current {
            Some(i) => (i + direction).rem_euclid(len),
            // Unset field: forward lands on the first option, backward on the last.
            None => {
                if direction > 0 {
                    0
                } else {
                    len - 1
                }
            }
        };

        field.value = options[next as usize].to_string();
        self.error_message = None;
    }

    /// Snapshot the form into an intake record, in submission field order.
    #[must_use]
    pub fn to_record(&self) -> IntakeRecord {
        IntakeRecord {
            age: self.fields[0].value.clone(),
            gender: self.fields[1].value.clone(),
            height: self.fields[2].value.clone(),
            weight: self.fields[3].value.clone(),
            ap_hi: self.fields[4].value.clone(),
            ap_lo: self.fields[5].value.clone(),
            cholesterol: self.fields[6].value.clone(),
            gluc: self.fields[7].value.clone(),
            smoke: self.fields[8].value.clone(),
            alco: self.fields[9].value.clone(),
            active: self.fields[10].value.clone(),
        }
    }

    /// Load sample data for a quick demo run.
    pub fn load_sample_data(&mut self) {
        let sample = [
            "45",     // age (years)
            "Male",   // gender
            "170",    // height (cm)
            "75",     // weight (kg)
            "120",    // ap_hi (mm Hg)
            "80",     // ap_lo (mm Hg)
            "Normal", // cholesterol
            "Normal", // glucose
            "No",     // smoking
            "No",     // alcohol
            "Yes",    // physical activity
        ];
        for (field, value) in self.fields.iter_mut().zip(sample) {
            field.value = value.to_string();
        }
        self.error_message = None;
    }
}

/// Render the intake form
pub fn render_form(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled("Health Information Form", ClinicTheme::title()),
        Span::styled(
            " │ Cardiovascular Risk Screening",
            ClinicTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = state.fields.len().div_ceil(2);

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            ClinicTheme::border_focused()
        } else {
            ClinicTheme::border()
        };

        let title_style = if is_selected {
            ClinicTheme::focused()
        } else {
            ClinicTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(field.hint, ClinicTheme::text_muted())
        } else if matches!(field.kind, FieldKind::Choice(_)) {
            Span::styled(format!("< {} >", field.value), ClinicTheme::text())
        } else {
            Span::styled(field.value.clone(), ClinicTheme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected && matches!(field.kind, FieldKind::Numeric) {
                Span::styled("▌", ClinicTheme::focused())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", ClinicTheme::danger()),
            Span::styled(err.clone(), ClinicTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", ClinicTheme::key_hint()),
            Span::styled("Navigate ", ClinicTheme::key_desc()),
            Span::styled("[←→] ", ClinicTheme::key_hint()),
            Span::styled("Choose ", ClinicTheme::key_desc()),
            Span::styled("[Enter] ", ClinicTheme::key_hint()),
            Span::styled("Get Prediction ", ClinicTheme::key_desc()),
            Span::styled("[S] ", ClinicTheme::key_hint()),
            Span::styled("Sample Data ", ClinicTheme::key_desc()),
            Span::styled("[Esc] ", ClinicTheme::key_hint()),
            Span::styled("Quit", ClinicTheme::key_desc()),
        ])
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
    use pretty_assertions::assert_eq;

    #[test]
    fn form_has_eleven_fields_in_submission_order() {
        let state = IntakeFormState::default();
        assert_eq!(state.fields.len(), 11);
        assert_eq!(state.fields[0].label, "Age");
        assert_eq!(state.fields[10].label, "Physical Activity");
    }

    #[test]
    fn numeric_field_accepts_digits_only() {
        let mut state = IntakeFormState::default();
        state.input_char('4');
        state.input_char('x');
        state.input_char('5');

        assert_eq!(state.fields[0].value, "45");
    }

    #[test]
    fn choice_field_ignores_typed_characters() {
        let mut state = IntakeFormState::default();
        state.selected_field = 1; // gender
        state.input_char('7');

        assert_eq!(state.fields[1].value, "");
    }

    #[test]
    fn choice_field_cycles_through_options() {
        let mut state = IntakeFormState::default();
        state.selected_field = 6; // cholesterol

        state.cycle_next();
        assert_eq!(state.fields[6].value, "Normal");
        state.cycle_next();
        assert_eq!(state.fields[6].value, "Border-Line");
        state.cycle_next();
        assert_eq!(state.fields[6].value, "High");
        state.cycle_next();
        assert_eq!(state.fields[6].value, "Normal");

        state.cycle_prev();
        assert_eq!(state.fields[6].value, "High");
    }

    #[test]
    fn editing_clears_the_visible_error() {
        let mut state = IntakeFormState::default();
        state.error_message = Some("Age must be between 1 and 120".to_string());

        state.input_char('4');
        assert_eq!(state.error_message, None);

        state.error_message = Some("again".to_string());
        state.selected_field = 1;
        state.cycle_next();
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn sample_data_produces_a_valid_record() {
        let mut state = IntakeFormState::default();
        state.load_sample_data();

        let record = state.to_record();
        assert_eq!(record.validate(), Ok(()));
        assert_eq!(record.age, "45");
        assert_eq!(record.active, "Yes");
    }
}
