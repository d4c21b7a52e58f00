//! Recorded engine mutation calls.

use serde::Serialize;

/// One successful mutation call, as recorded by [`MemoryEngine`](crate::MemoryEngine).
///
/// Payload values are omitted; the log exists to assert which calls were
/// made and in what order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum EngineCall {
    // Style
    AddSource { id: String },
    RemoveSource { id: String },
    AddLayer { id: String, before_id: Option<String> },
    RemoveLayer { id: String },
    MoveLayer { id: String, before_id: Option<String> },
    SetFilter { id: String },
    SetLayoutProperty { id: String, key: String },
    SetPaintProperty { id: String, key: String },
    SetLayerZoomRange { id: String, min: f64, max: f64 },
    SetSourceData { id: String },
    SetSourceCoordinates { id: String },
    UpdateImage { id: String },
    SetSourceUrl { id: String },
    SetSourceTiles { id: String },

    // Markers
    AddMarker { id: String },
    RemoveMarker { id: String },
    SetMarkerLngLat { id: String },
    SetMarkerOffset { id: String },
    SetMarkerDraggable { id: String, draggable: bool },
    SetMarkerRotation { id: String },
    SetMarkerRotationAlignment { id: String },
    SetMarkerPitchAlignment { id: String },
    SetMarkerPopup { id: String, popup: Option<String> },

    // Popups
    AddPopup { id: String },
    RemovePopup { id: String },
    SetPopupLngLat { id: String },
    SetPopupOffset { id: String },
    SetPopupAnchor { id: String },
    SetPopupMaxWidth { id: String },
    AddPopupClassName { id: String, class: String },
    RemovePopupClassName { id: String, class: String },

    // Controls
    AddControl { id: String },
    RemoveControl { id: String },
}

impl EngineCall {
    /// Name of the engine method, e.g. `"add_source"`.
    pub fn method(&self) -> &'static str {
        match self {
            EngineCall::AddSource { .. } => "add_source",
            EngineCall::RemoveSource { .. } => "remove_source",
            EngineCall::AddLayer { .. } => "add_layer",
            EngineCall::RemoveLayer { .. } => "remove_layer",
            EngineCall::MoveLayer { .. } => "move_layer",
            EngineCall::SetFilter { .. } => "set_filter",
            EngineCall::SetLayoutProperty { .. } => "set_layout_property",
            EngineCall::SetPaintProperty { .. } => "set_paint_property",
            EngineCall::SetLayerZoomRange { .. } => "set_layer_zoom_range",
            EngineCall::SetSourceData { .. } => "set_source_data",
            EngineCall::SetSourceCoordinates { .. } => "set_source_coordinates",
            EngineCall::UpdateImage { .. } => "update_image",
            EngineCall::SetSourceUrl { .. } => "set_source_url",
            EngineCall::SetSourceTiles { .. } => "set_source_tiles",
            EngineCall::AddMarker { .. } => "add_marker",
            EngineCall::RemoveMarker { .. } => "remove_marker",
            EngineCall::SetMarkerLngLat { .. } => "set_marker_lng_lat",
            EngineCall::SetMarkerOffset { .. } => "set_marker_offset",
            EngineCall::SetMarkerDraggable { .. } => "set_marker_draggable",
            EngineCall::SetMarkerRotation { .. } => "set_marker_rotation",
            EngineCall::SetMarkerRotationAlignment { .. } => "set_marker_rotation_alignment",
            EngineCall::SetMarkerPitchAlignment { .. } => "set_marker_pitch_alignment",
            EngineCall::SetMarkerPopup { .. } => "set_marker_popup",
            EngineCall::AddPopup { .. } => "add_popup",
            EngineCall::RemovePopup { .. } => "remove_popup",
            EngineCall::SetPopupLngLat { .. } => "set_popup_lng_lat",
            EngineCall::SetPopupOffset { .. } => "set_popup_offset",
            EngineCall::SetPopupAnchor { .. } => "set_popup_anchor",
            EngineCall::SetPopupMaxWidth { .. } => "set_popup_max_width",
            EngineCall::AddPopupClassName { .. } => "add_popup_class_name",
            EngineCall::RemovePopupClassName { .. } => "remove_popup_class_name",
            EngineCall::AddControl { .. } => "add_control",
            EngineCall::RemoveControl { .. } => "remove_control",
        }
    }

    /// Id of the entity the call targeted.
    pub fn target(&self) -> &str {
        match self {
            EngineCall::AddSource { id }
            | EngineCall::RemoveSource { id }
            | EngineCall::AddLayer { id, .. }
            | EngineCall::RemoveLayer { id }
            | EngineCall::MoveLayer { id, .. }
            | EngineCall::SetFilter { id }
            | EngineCall::SetLayoutProperty { id, .. }
            | EngineCall::SetPaintProperty { id, .. }
            | EngineCall::SetLayerZoomRange { id, .. }
            | EngineCall::SetSourceData { id }
            | EngineCall::SetSourceCoordinates { id }
            | EngineCall::UpdateImage { id }
            | EngineCall::SetSourceUrl { id }
            | EngineCall::SetSourceTiles { id }
            | EngineCall::AddMarker { id }
            | EngineCall::RemoveMarker { id }
            | EngineCall::SetMarkerLngLat { id }
            | EngineCall::SetMarkerOffset { id }
            | EngineCall::SetMarkerDraggable { id, .. }
            | EngineCall::SetMarkerRotation { id }
            | EngineCall::SetMarkerRotationAlignment { id }
            | EngineCall::SetMarkerPitchAlignment { id }
            | EngineCall::SetMarkerPopup { id, .. }
            | EngineCall::AddPopup { id }
            | EngineCall::RemovePopup { id }
            | EngineCall::SetPopupLngLat { id }
            | EngineCall::SetPopupOffset { id }
            | EngineCall::SetPopupAnchor { id }
            | EngineCall::SetPopupMaxWidth { id }
            | EngineCall::AddPopupClassName { id, .. }
            | EngineCall::RemovePopupClassName { id, .. }
            | EngineCall::AddControl { id }
            | EngineCall::RemoveControl { id } => id,
        }
    }
}
