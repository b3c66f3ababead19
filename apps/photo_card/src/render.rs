use client_core::{ArtworkView, CardView, ImageCardView};
use shared::domain::Reaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Next,
    Previous,
    Like,
    Dislike,
    Share,
    Show,
    Help,
    Quit,
}

impl Gesture {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Some(Self::Next),
            "p" | "prev" | "previous" => Some(Self::Previous),
            "l" | "like" => Some(Self::Like),
            "d" | "dislike" => Some(Self::Dislike),
            "s" | "share" => Some(Self::Share),
            "" | "show" => Some(Self::Show),
            "h" | "?" | "help" => Some(Self::Help),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub const HELP: &str = "gestures: [n]ext [p]rev [l]ike [d]islike [s]hare [h]elp [q]uit";

fn reaction_line(reaction: Option<Reaction>) -> String {
    let mark = |active: bool, label: &str| {
        if active {
            format!("[{label}]")
        } else {
            label.to_string()
        }
    };
    format!(
        "{}  {}",
        mark(reaction == Some(Reaction::Like), "like"),
        mark(reaction == Some(Reaction::Dislike), "dislike")
    )
}

fn render_artwork(view: &ArtworkView) -> String {
    let mut lines = vec![view.heading()];
    if !view.artist.is_empty() {
        lines.push(view.artist.clone());
    }
    lines.push(format!("image: {}", view.image));
    if !view.description.is_empty() {
        lines.push(view.description.clone());
    }
    lines.push(reaction_line(view.reaction));

    let previous = if view.previous_disabled { "-" } else { "<" };
    let next = if view.next_disabled { "-" } else { ">" };
    lines.push(format!("{previous} {} {next}", view.position_label()));
    lines.join("\n")
}

pub fn render_card(view: &CardView) -> String {
    match view {
        CardView::Loading => "Loading artwork...".to_string(),
        CardView::Empty => "No artworks available.".to_string(),
        CardView::Artwork(artwork) => render_artwork(artwork),
    }
}

pub fn render_image(view: &ImageCardView) -> String {
    match view {
        ImageCardView::Loading => "Loading image...".to_string(),
        ImageCardView::Empty => "No image available.".to_string(),
        ImageCardView::Image {
            image,
            link,
            reaction,
        } => {
            let mut lines = vec![format!("image: {image}")];
            if !link.is_empty() {
                lines.push(format!("link: {link}"));
            }
            lines.push(reaction_line(*reaction));
            lines.join("\n")
        }
    }
}
