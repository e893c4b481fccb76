//! Data exchanged with the host: piece records, update payloads and the
//! forwarded-command wire format.
use board_core::{PieceId, Point, SceneId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of a piece as the host's registry knows it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub id: PieceId,
    pub name: String,
    pub top_left: Point,
    /// Footprint in pixels.
    pub width: f64,
    pub height: f64,
}

impl PieceRecord {
    pub fn new(id: PieceId, name: impl Into<String>, top_left: Point, width: f64, height: f64) -> Self {
        Self {
            id,
            name: name.into(),
            top_left,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        self.top_left + Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Top-left corner that puts this piece's center on `center`.
    pub fn top_left_for_center(&self, center: Point) -> Point {
        center - Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Payload handed to the host's update pipeline.
///
/// `fields` carries whatever extra keys the host or other pre-commit hooks
/// attach (movement tracking, flags); hooks may rewrite or strip them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceUpdate {
    pub x: f64,
    pub y: f64,
    pub animate: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PieceUpdate {
    pub fn new(top_left: Point, animate: bool) -> Self {
        Self {
            x: top_left.x,
            y: top_left.y,
            animate,
            fields: Map::new(),
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Command sent to a privileged peer when the initiator may not commit itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ForwardMessage {
    #[serde(rename_all = "camelCase")]
    MoveToken {
        scene_id: SceneId,
        token_id: PieceId,
        coordinates: Point,
        animate: bool,
    },
    #[serde(rename_all = "camelCase")]
    SwapTokens {
        scene_id: SceneId,
        token_ids: [PieceId; 2],
        coordinates: [Point; 2],
        animate: bool,
    },
}

impl ForwardMessage {
    pub fn scene_id(&self) -> SceneId {
        match self {
            ForwardMessage::MoveToken { scene_id, .. }
            | ForwardMessage::SwapTokens { scene_id, .. } => *scene_id,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_message_uses_wire_names() {
        let message = ForwardMessage::MoveToken {
            scene_id: SceneId(3),
            token_id: PieceId(11),
            coordinates: Point::new(150.0, 200.0),
            animate: true,
        };
        let value: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        assert_eq!(value["action"], "moveToken");
        assert_eq!(value["sceneId"], 3);
        assert_eq!(value["tokenId"], 11);
        assert_eq!(value["coordinates"]["x"], 150.0);
        assert_eq!(ForwardMessage::from_json(&message.to_json().unwrap()).unwrap(), message);
    }

    #[test]
    fn swap_message_carries_both_pieces() {
        let payload = r#"{"action":"swapTokens","sceneId":1,"tokenIds":[4,5],
            "coordinates":[{"x":0.0,"y":0.0},{"x":100.0,"y":0.0}],"animate":false}"#;
        let message = ForwardMessage::from_json(payload).unwrap();
        assert_eq!(message.scene_id(), SceneId(1));
        let ForwardMessage::SwapTokens { token_ids, .. } = message else {
            panic!("expected swap");
        };
        assert_eq!(token_ids, [PieceId(4), PieceId(5)]);
    }

    #[test]
    fn update_flattens_extra_fields() {
        let mut update = PieceUpdate::new(Point::new(10.0, 20.0), false);
        update
            .fields
            .insert("movementHistory".into(), Value::Array(Vec::new()));
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["x"], 10.0);
        assert!(value.get("movementHistory").is_some());
    }

    #[test]
    fn center_and_top_left_are_inverse() {
        let piece = PieceRecord::new(PieceId(1), "Ogre", Point::new(100.0, 100.0), 200.0, 200.0);
        assert_eq!(piece.center(), Point::new(200.0, 200.0));
        assert_eq!(piece.top_left_for_center(piece.center()), piece.top_left);
    }
}
