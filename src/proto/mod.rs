// Wire messages are declared here with prost derives; the service stubs are
// generated by build.rs into OUT_DIR.

pub mod board {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum ItemType {
        Unspecified = 0,
        Lost = 1,
        Found = 2,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Empty {}

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ImageUpload {
        #[prost(string, tag = "1")]
        pub file_name: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub content_type: ::prost::alloc::string::String,
        #[prost(bytes = "vec", tag = "3")]
        pub data: ::prost::alloc::vec::Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CreateItemRequest {
        #[prost(string, tag = "1")]
        pub item_name: ::prost::alloc::string::String,
        #[prost(enumeration = "ItemType", tag = "2")]
        pub item_type: i32,
        #[prost(string, tag = "3")]
        pub description: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub location: ::prost::alloc::string::String,
        #[prost(string, tag = "5")]
        pub date: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "6")]
        pub image: ::core::option::Option<ImageUpload>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CreateItemResponse {
        #[prost(string, tag = "1")]
        pub id: ::prost::alloc::string::String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Item {
        #[prost(string, tag = "1")]
        pub id: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub item_name: ::prost::alloc::string::String,
        #[prost(enumeration = "ItemType", tag = "3")]
        pub item_type: i32,
        #[prost(string, tag = "4")]
        pub description: ::prost::alloc::string::String,
        #[prost(string, tag = "5")]
        pub location: ::prost::alloc::string::String,
        #[prost(string, tag = "6")]
        pub date: ::prost::alloc::string::String,
        #[prost(string, optional, tag = "7")]
        pub image_data: ::core::option::Option<::prost::alloc::string::String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ListItemsResponse {
        #[prost(message, repeated, tag = "1")]
        pub items: ::prost::alloc::vec::Vec<Item>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct BoardResponse {
        #[prost(message, repeated, tag = "1")]
        pub all: ::prost::alloc::vec::Vec<Item>,
        #[prost(message, repeated, tag = "2")]
        pub lost: ::prost::alloc::vec::Vec<Item>,
        #[prost(message, repeated, tag = "3")]
        pub found: ::prost::alloc::vec::Vec<Item>,
    }

    include!(concat!(env!("OUT_DIR"), "/board.v1.ItemsService.rs"));
}

pub mod health {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct HealthCheckRequest {
        #[prost(string, tag = "1")]
        pub service: ::prost::alloc::string::String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct HealthCheckResponse {
        #[prost(enumeration = "health_check_response::ServingStatus", tag = "1")]
        pub status: i32,
    }

    pub mod health_check_response {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum ServingStatus {
            Unknown = 0,
            Serving = 1,
            NotServing = 2,
            ServiceUnknown = 3,
        }
    }

    include!(concat!(env!("OUT_DIR"), "/grpc.health.v1.Health.rs"));
}
