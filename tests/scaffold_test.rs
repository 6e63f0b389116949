//! End-to-end scaffolding through the transport

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use cloudgen::ErrorKind;
use cloudgen::config::ScaffoldConfig;
use cloudgen::templates::{EmbeddedTemplateStore, TemplateStore};
use cloudgen::transport::ScaffoldTransport;
use tempfile::TempDir;
use zip::ZipArchive;

fn config(work: &Path) -> ScaffoldConfig {
    ScaffoldConfig {
        generate_path: work.to_path_buf(),
        ..ScaffoldConfig::default()
    }
}

fn unpack(bytes: &[u8]) -> BTreeMap<String, String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut files = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        files.insert(file.name().to_string(), content);
    }
    files
}

/// Copy the embedded templates into `root` so a test can override some of them
async fn export_embedded_templates(root: &Path) {
    let store = EmbeddedTemplateStore::new();
    for key in store.list() {
        let content = store.find(Path::new(""), &key).await.unwrap().unwrap();
        let path = root.join(&key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

#[tokio::test]
async fn test_gateway_archive_contents() {
    let work = TempDir::new().unwrap();
    let transport = ScaffoldTransport::new(config(work.path())).unwrap();

    let bytes = transport
        .download_bytes("sc-alone-radio=gateway-server\nprojectName=orders\napplicationType=zuul\n")
        .await
        .unwrap();
    let files = unpack(&bytes);

    let names: Vec<&str> = files.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "orders-zuul/.gitignore",
            "orders-zuul/pom.xml",
            "orders-zuul/src/main/java/com/orders/zuul/ZuulApplication.java",
            "orders-zuul/src/main/java/com/orders/zuul/filter/ErrorFilter.java",
            "orders-zuul/src/main/java/com/orders/zuul/filter/PostFilter.java",
            "orders-zuul/src/main/java/com/orders/zuul/filter/PreFilter.java",
            "orders-zuul/src/main/java/com/orders/zuul/filter/RouteFilter.java",
            "orders-zuul/src/main/resources/application.yml",
            "orders-zuul/src/main/resources/logback.xml",
            "orders-zuul/src/test/java/com/orders/zuul/ZuulApplicationTests.java",
        ]
    );

    let application = &files["orders-zuul/src/main/java/com/orders/zuul/ZuulApplication.java"];
    assert!(application.contains("import org.springframework.cloud.netflix.zuul.EnableZuulProxy;"));
    assert!(application.contains("@EnableZuulProxy\n@EnableDiscoveryClient\npublic class ZuulApplication {"));

    let pom = &files["orders-zuul/pom.xml"];
    assert!(pom.contains("<groupId>com.orders</groupId>"));
    assert!(pom.contains("<artifactId>orders-zuul</artifactId>"));
    assert!(pom.contains("<artifactId>spring-cloud-starter-netflix-zuul</artifactId>"));
    assert!(pom.contains("<version>2.1.18.RELEASE</version>"));

    let yml = &files["orders-zuul/src/main/resources/application.yml"];
    assert!(yml.contains("port: 8080"));
    assert!(yml.contains("name: orders-zuul"));

    let logback = &files["orders-zuul/src/main/resources/logback.xml"];
    assert!(logback.contains("<property name=\"SERVICE_NAME\" value=\"orders-zuul\"/>"));
}

#[tokio::test]
async fn test_registry_server_with_overrides() {
    let work = TempDir::new().unwrap();
    let transport = ScaffoldTransport::new(config(work.path())).unwrap();

    let bytes = transport
        .download_bytes(
            "sc-alone-radio = eureka-server\n\
             projectName = discovery\n\
             applicationType = springcloud\n\
             basePackage = cn.springcloud\n\
             serverPort = 9761\n",
        )
        .await
        .unwrap();
    let files = unpack(&bytes);

    let application =
        &files["discovery-eureka/src/main/java/cn/springcloud/eureka/EurekaApplication.java"];
    assert!(application.contains("package cn.springcloud.eureka;"));
    assert!(application.contains("@EnableEurekaServer"));
    assert!(!application.contains("@EnableDiscoveryClient"));

    let yml = &files["discovery-eureka/src/main/resources/application.yml"];
    assert!(yml.contains("port: 9761"));
    assert!(yml.contains("register-with-eureka: false"));
}

#[tokio::test]
async fn test_config_server_without_eureka() {
    let work = TempDir::new().unwrap();
    let transport = ScaffoldTransport::new(config(work.path())).unwrap();

    let bytes = transport
        .download_bytes(
            "sc-alone-radio=config-server\nprojectName=settings\napplicationType=springcloud\n\
             registerWithEureka=false\nconfigGitUri=https://git.example.com/config.git\n",
        )
        .await
        .unwrap();
    let files = unpack(&bytes);

    let yml = &files["settings-config/src/main/resources/application.yml"];
    assert!(yml.contains("uri: https://git.example.com/config.git"));
    assert!(yml.contains("register-with-eureka: false"));
    assert!(yml.contains("port: 8888"));

    let pom = &files["settings-config/pom.xml"];
    assert!(pom.contains("spring-cloud-config-server"));
    assert!(!pom.contains("spring-cloud-starter-netflix-eureka-client"));
}

#[tokio::test]
async fn test_variant_template_overrides_base() {
    let work = TempDir::new().unwrap();
    let templates = TempDir::new().unwrap();
    export_embedded_templates(templates.path()).await;

    let variant = templates.path().join("variants/custom/zuul");
    std::fs::create_dir_all(&variant).unwrap();
    std::fs::write(
        variant.join("ZuulFilter.java.template"),
        "// custom {{ className }} ({{ filterType }})\n",
    )
    .unwrap();

    let transport = ScaffoldTransport::new(ScaffoldConfig {
        template_dir: Some(templates.path().to_path_buf()),
        ..config(work.path())
    })
    .unwrap();

    let custom = unpack(
        &transport
            .download_bytes("sc-alone-radio=gateway-server\nprojectName=orders\napplicationType=custom\n")
            .await
            .unwrap(),
    );
    assert_eq!(
        custom["orders-zuul/src/main/java/com/orders/zuul/filter/PostFilter.java"].trim_end(),
        "// custom PostFilter (post)"
    );
    // Templates missing from the variant fall back to the base tree
    assert!(custom["orders-zuul/pom.xml"].contains("<artifactId>orders-zuul</artifactId>"));

    let standard = unpack(
        &transport
            .download_bytes("sc-alone-radio=gateway-server\nprojectName=orders\napplicationType=zuul\n")
            .await
            .unwrap(),
    );
    assert!(
        standard["orders-zuul/src/main/java/com/orders/zuul/filter/PostFilter.java"]
            .contains("extends ZuulFilter")
    );
}

#[tokio::test]
async fn test_broken_variant_template_is_left_out() {
    let work = TempDir::new().unwrap();
    let templates = TempDir::new().unwrap();
    export_embedded_templates(templates.path()).await;

    let variant = templates.path().join("variants/broken/common");
    std::fs::create_dir_all(&variant).unwrap();
    std::fs::write(variant.join("logback.xml.template"), "{{ undefinedValue }}").unwrap();

    let transport = ScaffoldTransport::new(ScaffoldConfig {
        template_dir: Some(templates.path().to_path_buf()),
        ..config(work.path())
    })
    .unwrap();

    let properties = ScaffoldTransport::parse_properties(
        "sc-alone-radio=config-server\nprojectName=settings\napplicationType=broken\n",
    )
    .unwrap();
    let archive = transport.generate(&properties).await.unwrap();

    assert!(!archive.is_complete());
    assert_eq!(archive.failures.len(), 1);
    assert_eq!(archive.failures[0].generator, "logback-xml");

    let files = unpack(&archive.bytes);
    assert!(!files.contains_key("settings-config/src/main/resources/logback.xml"));
    assert!(files.contains_key("settings-config/pom.xml"));
    assert!(files.contains_key("settings-config/.gitignore"));
}

#[tokio::test]
async fn test_missing_template_fails_whole_request() {
    let work = TempDir::new().unwrap();
    let templates = TempDir::new().unwrap();
    std::fs::create_dir_all(templates.path().join("base")).unwrap();

    let transport = ScaffoldTransport::new(ScaffoldConfig {
        template_dir: Some(templates.path().to_path_buf()),
        ..config(work.path())
    })
    .unwrap();

    let err = transport
        .download_bytes("sc-alone-radio=gateway-server\nprojectName=orders\napplicationType=zuul\n")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
    assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_identical_requests_identical_results() {
    let work = TempDir::new().unwrap();
    let transport = ScaffoldTransport::new(config(work.path())).unwrap();
    let blob = "sc-alone-radio=registry-server\nprojectName=orders\napplicationType=springcloud\n";

    let first = transport.download_response(blob).await.unwrap();
    let second = transport.download_response(blob).await.unwrap();

    assert_eq!(first.file_name, second.file_name);
    assert_eq!(first.body, second.body);
    assert_eq!(first.file_name, "orders-skeleton.zip");
}

#[tokio::test]
async fn test_invalid_typed_property() {
    let work = TempDir::new().unwrap();
    let transport = ScaffoldTransport::new(config(work.path())).unwrap();

    let err = transport
        .download_bytes(
            "sc-alone-radio=gateway-server\nprojectName=orders\napplicationType=zuul\nserverPort=http\n",
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TypeCoercion);
    assert!(err.to_string().contains("serverPort"));
    let leftover: Vec<PathBuf> = std::fs::read_dir(work.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert!(leftover.is_empty(), "left behind: {leftover:?}");
}

#[tokio::test]
async fn test_project_name_outside_output_root_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path().join("work");
    let transport = ScaffoldTransport::new(config(&work)).unwrap();

    for name in ["../../escaped", "/abs"] {
        let err = transport
            .download_bytes(&format!(
                "sc-alone-radio=gateway-server\nprojectName={name}\napplicationType=zuul\n"
            ))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProperties, "{name}");
    }

    assert!(!temp_dir.path().join("escaped-zuul").exists());
    assert!(!Path::new("/abs-zuul").exists());
    let leftover: Vec<PathBuf> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert!(leftover.is_empty(), "left behind: {leftover:?}");
}
