use crate::error::StoreError;
use crate::store::RoomDirectory;
use crate::text::{is_blank, normalize};
use crate::types::{Attachment, DirectoryEntry, Response};

pub const DEFAULT_FLOOR_MAP_URL: &str = "https://wpsvc5.com/ESASSO026/";
pub const ROOM_NOT_FOUND: &str = "Sorry, room not found.";

const HELP_LINES: [&str; 3] = [
    "/meetingroom Camino --> direction how to go to meeting room Camino",
    "/meetingroom map    --> show floor plan map",
    "/meetingroom list   --> show all meeting rooms name",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Map,
    List,
    Help,
    Room(String),
}

impl Command {
    pub fn parse(text: &str) -> Self {
        let key = normalize(text);
        match key.as_str() {
            "map" => Command::Map,
            "list" => Command::List,
            "help" => Command::Help,
            _ => Command::Room(key),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Responder {
    floor_map_url: String,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR_MAP_URL)
    }
}

impl Responder {
    pub fn new(floor_map_url: impl Into<String>) -> Self {
        Self {
            floor_map_url: floor_map_url.into(),
        }
    }

    pub async fn retrieve<D>(&self, text: &str, directory: &D) -> Result<Response, StoreError>
    where
        D: RoomDirectory + ?Sized,
    {
        let response = match Command::parse(text) {
            Command::Map => self.map(),
            Command::List => list(&directory.list_rooms().await?),
            Command::Help => help(),
            Command::Room(key) => match directory.find_room(&key).await? {
                Some(entry) => room(text, &entry),
                None => Response::text(ROOM_NOT_FOUND),
            },
        };
        Ok(response)
    }

    fn map(&self) -> Response {
        Response::text(format!("Floor plan map: {}", self.floor_map_url))
    }
}

fn preformatted(body: &str) -> String {
    format!("```\n{}\n```", body)
}

pub fn list(entries: &[DirectoryEntry]) -> Response {
    let rooms = entries
        .iter()
        .map(|entry| format!("{}. {}", entry.id, entry.room_name))
        .collect::<Vec<_>>()
        .join("\n");
    Response::text(preformatted(&rooms))
}

pub fn help() -> Response {
    Response::text(preformatted(&HELP_LINES.join("\n")))
}

pub fn room(original: &str, entry: &DirectoryEntry) -> Response {
    let mut text = format!("{} - {}", original, entry.direction);
    if let Some(notes) = entry.notes.as_deref().filter(|n| !is_blank(Some(n))) {
        text.push_str(" *Notes:* ");
        text.push_str(notes);
    }

    let attachment = entry
        .image
        .as_deref()
        .filter(|img| !is_blank(Some(img)))
        .map(|img| Attachment {
            title: entry.room_name.clone(),
            image_url: img.to_string(),
        });

    Response { text, attachment }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn entry(id: i64, name: &str, notes: Option<&str>, image: Option<&str>) -> DirectoryEntry {
        DirectoryEntry {
            id,
            room_name: name.to_string(),
            direction: format!("Take the elevator to 3F, {} is on the left", name),
            notes: notes.map(String::from),
            image: image.map(String::from),
        }
    }

    fn directory() -> MemoryStore {
        MemoryStore::with_rooms(vec![
            entry(1, "Camino", Some("Badge required"), Some("https://img.example/camino.png")),
            entry(2, "Big Sur", None, None),
            entry(3, "Pismo", Some("  "), None),
        ])
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(" M a P "), Command::Map);
        assert_eq!(Command::parse("LIST"), Command::List);
        assert_eq!(Command::parse("Help"), Command::Help);
        assert_eq!(Command::parse("Big Sur"), Command::Room("bigsur".to_string()));
    }

    #[tokio::test]
    async fn test_map_ignores_directory() {
        let responder = Responder::default();
        let empty = MemoryStore::new();
        let response = responder.retrieve("  MAP", &empty).await.unwrap();
        assert!(response.text.contains(DEFAULT_FLOOR_MAP_URL));
        assert!(response.attachment.is_none());
    }

    #[tokio::test]
    async fn test_map_uses_configured_url() {
        let responder = Responder::new("https://maps.example/floor");
        let response = responder.retrieve("map", &directory()).await.unwrap();
        assert!(response.text.contains("https://maps.example/floor"));
    }

    #[tokio::test]
    async fn test_list_renders_entries_in_order() {
        let response = Responder::default()
            .retrieve("list", &directory())
            .await
            .unwrap();
        assert_eq!(response.text, "```\n1. Camino\n2. Big Sur\n3. Pismo\n```");
    }

    #[tokio::test]
    async fn test_list_empty_directory() {
        let response = Responder::default()
            .retrieve("List", &MemoryStore::new())
            .await
            .unwrap();
        assert_eq!(response.text, "```\n\n```");
    }

    #[tokio::test]
    async fn test_help_has_three_usage_lines() {
        let response = Responder::default()
            .retrieve("help ", &directory())
            .await
            .unwrap();
        assert!(response.text.starts_with("```\n"));
        assert!(response.text.ends_with("\n```"));
        assert_eq!(
            response.text.lines().filter(|l| l.contains("-->")).count(),
            3
        );
    }

    #[tokio::test]
    async fn test_room_with_notes_and_image() {
        let response = Responder::default()
            .retrieve("camino", &directory())
            .await
            .unwrap();
        assert_eq!(
            response.text,
            "camino - Take the elevator to 3F, Camino is on the left *Notes:* Badge required"
        );
        assert_eq!(
            response.attachment,
            Some(Attachment {
                title: "Camino".to_string(),
                image_url: "https://img.example/camino.png".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_room_lookup_ignores_case_and_spacing() {
        let response = Responder::default()
            .retrieve("BIG sur", &directory())
            .await
            .unwrap();
        assert!(response.text.starts_with("BIG sur - "));
        assert!(response.text.contains("Big Sur is on the left"));
        assert!(!response.text.contains("*Notes:*"));
        assert!(response.attachment.is_none());
    }

    #[tokio::test]
    async fn test_blank_notes_are_omitted() {
        let response = Responder::default()
            .retrieve("pismo", &directory())
            .await
            .unwrap();
        assert!(!response.text.contains("*Notes:*"));
    }

    #[tokio::test]
    async fn test_every_entry_is_reachable() {
        let store = directory();
        let responder = Responder::default();
        for entry in store.list_rooms().await.unwrap() {
            let response = responder
                .retrieve(&entry.room_name.to_uppercase(), &store)
                .await
                .unwrap();
            assert!(response.text.contains(&entry.direction));
            let has_notes = !is_blank(entry.notes.as_deref());
            assert_eq!(response.text.contains("*Notes:*"), has_notes);
        }
    }

    #[tokio::test]
    async fn test_unknown_room() {
        let response = Responder::default()
            .retrieve("nonexistent room", &directory())
            .await
            .unwrap();
        assert_eq!(response, Response::text(ROOM_NOT_FOUND));
    }
}
