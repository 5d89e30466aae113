use tonic_build::manual::{Builder, Method, Service};

const PROST_CODEC: &str = "tonic::codec::ProstCodec";

fn unary(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(input)
        .output_type(output)
        .codec_path(PROST_CODEC)
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Messages are hand-written prost types in src/proto/mod.rs, so the
    // service stubs are generated without protoc.
    let items_service = Service::builder()
        .name("ItemsService")
        .package("board.v1")
        .method(unary(
            "create_item",
            "CreateItem",
            "crate::proto::board::CreateItemRequest",
            "crate::proto::board::CreateItemResponse",
        ))
        .method(unary(
            "list_items",
            "ListItems",
            "crate::proto::board::Empty",
            "crate::proto::board::ListItemsResponse",
        ))
        .method(unary(
            "get_board",
            "GetBoard",
            "crate::proto::board::Empty",
            "crate::proto::board::BoardResponse",
        ))
        .build();

    let health_service = Service::builder()
        .name("Health")
        .package("grpc.health.v1")
        .method(unary(
            "check",
            "Check",
            "crate::proto::health::HealthCheckRequest",
            "crate::proto::health::HealthCheckResponse",
        ))
        .method(
            Method::builder()
                .name("watch")
                .route_name("Watch")
                .input_type("crate::proto::health::HealthCheckRequest")
                .output_type("crate::proto::health::HealthCheckResponse")
                .codec_path(PROST_CODEC)
                .server_streaming()
                .build(),
        )
        .build();

    Builder::new()
        .build_server(true)
        .build_client(true)
        .compile(&[items_service, health_service]);

    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
