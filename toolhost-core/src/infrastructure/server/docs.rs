use super::dto::{
    ErrorResponse, MessageResponse, RegisterToolRequest, RestChatRequest, RestChatResponse,
    StatusResponse,
};
use super::routes;
use crate::types::{ChatMessage, MessageRole, ToolCallRequest};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::status::status_handler,
        routes::tools::register_tool_handler,
        routes::chat::chat_handler,
        routes::conversation::get_conversation_handler,
        routes::conversation::delete_conversation_handler
    ),
    components(
        schemas(
            RestChatRequest,
            RestChatResponse,
            RegisterToolRequest,
            MessageResponse,
            StatusResponse,
            ErrorResponse,
            ChatMessage,
            MessageRole,
            ToolCallRequest
        )
    ),
    tags(
        (name = "chat", description = "Tool-augmented chat turns"),
        (name = "conversation", description = "Session history"),
        (name = "tools", description = "Tool registration"),
        (name = "status", description = "Health and introspection")
    )
)]
pub struct ApiDoc;
