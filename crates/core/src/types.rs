/// Opaque diagram element identifier (`ai2d_id` on the wire).
pub type ElementId = String;

/// Key of the diagram image a task refers to.
pub type ImageKey = String;

/// Platform-assigned identifier of one worker submission.
pub type AssignmentId = String;
