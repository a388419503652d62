use eligibility_wizard::workflows::eligibility::view::{
    DisqualifiedView, EmailCaptureView, EmailFormView, QuestionView, SubmittedView,
};
use eligibility_wizard::workflows::eligibility::{
    EmbedWidget, Link, ScreenView, WidgetLoader, WizardAction, WizardView,
};
use std::fmt::Write as _;

const BAR_WIDTH: usize = 12;

/// Plain-text rendering of a screen for the terminal.
pub(crate) fn render_text(screen: &ScreenView, loader: &dyn WidgetLoader) -> String {
    let mut out = String::new();
    match &screen.view {
        WizardView::Question(view) => {
            header(&mut out, screen);
            question(&mut out, view, &screen.back_label);
        }
        WizardView::EmailCapture(view) => {
            header(&mut out, screen);
            email_capture(&mut out, view, &screen.back_label);
        }
        WizardView::Disqualified(view) => disqualified(&mut out, view, loader),
        WizardView::Submitted(view) => submitted(&mut out, view, loader),
    }
    out
}

fn header(out: &mut String, screen: &ScreenView) {
    let _ = writeln!(out, "{}", screen.title);
    let _ = writeln!(out, "{}\n", screen.subtitle);
}

fn progress_bar(out: &mut String, step: u8, total: u8, percent: u8) {
    let filled = (usize::from(percent) * BAR_WIDTH) / 100;
    let _ = writeln!(
        out,
        "[{}{}] step {step} of {total} ({percent}%)",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
    );
}

fn question(out: &mut String, view: &QuestionView, back_label: &str) {
    let _ = writeln!(out, "{}", view.prompt);
    if let Some(hint) = &view.hint {
        let _ = writeln!(out, "  {hint}");
    }
    if let Some(previous) = view.previous_answer {
        let _ = writeln!(out, "  (previously answered: {})", previous.label());
    }
    let _ = writeln!(out, "{}", actions_line(&view.actions, back_label));
    progress_bar(out, view.step, view.progress.total, view.progress_percent);
}

fn email_capture(out: &mut String, view: &EmailCaptureView, back_label: &str) {
    let _ = writeln!(out, "{}", view.heading);
    email_form(out, &view.form);
    let _ = writeln!(out, "{}", actions_line(&view.actions, back_label));
    progress_bar(out, view.step, view.progress.total, view.progress_percent);
}

fn disqualified(out: &mut String, view: &DisqualifiedView, loader: &dyn WidgetLoader) {
    let _ = writeln!(out, "{}", view.heading);
    for line in &view.body {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out);
    email_form(out, &view.form);
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "  {notice}");
    }
    widget(out, view.widget.as_ref(), loader);
    let _ = writeln!(out, "\nWellness services:");
    links(out, &view.offers);
    let _ = writeln!(out);
    links(out, &view.links);
    let _ = writeln!(out, "[r] {}  [q] Quit", view.restart_label);
}

fn submitted(out: &mut String, view: &SubmittedView, loader: &dyn WidgetLoader) {
    let _ = writeln!(out, "{}", view.heading);
    let _ = writeln!(out, "{}\n", view.body);
    links(out, &view.links);
    widget(out, view.widget.as_ref(), loader);
}

fn email_form(out: &mut String, form: &EmailFormView) {
    let current = if form.email.is_empty() {
        form.placeholder.as_str()
    } else {
        form.email.as_str()
    };
    let _ = writeln!(out, "{} [{current}]", form.label);
    if let Some(error) = &form.error {
        let _ = writeln!(out, "  ! {error}");
    }
}

fn links(out: &mut String, links: &[Link]) {
    for link in links {
        let _ = writeln!(out, "- {} <{}>", link.label, link.href);
    }
}

fn widget(out: &mut String, widget: Option<&EmbedWidget>, loader: &dyn WidgetLoader) {
    let Some(widget) = widget else {
        return;
    };
    match loader.load(widget) {
        Ok(mount) => {
            let _ = writeln!(out, "\nEmbedded form (#{}):\n{}", mount.mount_point, mount.markup);
        }
        Err(err) => {
            tracing::warn!(route = %widget.route, error = %err, "embed widget unavailable");
        }
    }
}

fn actions_line(actions: &[WizardAction], back_label: &str) -> String {
    actions
        .iter()
        .map(|action| match action {
            WizardAction::AnswerYes => "[y] Yes".to_string(),
            WizardAction::AnswerNo => "[n] No".to_string(),
            WizardAction::Back => format!("[b] {back_label}"),
            WizardAction::EditEmail => "type your email".to_string(),
            WizardAction::Submit => "press enter to submit".to_string(),
            WizardAction::Restart => "[r] Restart".to_string(),
        })
        .collect::<Vec<_>>()
        .join("  ")
}
