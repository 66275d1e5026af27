use super::*;
use frontstack_core::{Expr, ResourceKind};
use serde_json::{Value, json};

fn config() -> StackConfig {
    StackConfig {
        prefix: "acme".to_string(),
        account: Some("123456789012".to_string()),
        region: "us-east-1".to_string(),
        ..Default::default()
    }
}

fn with_domain() -> StackConfig {
    StackConfig {
        domain: Some("example.com".to_string()),
        hosted_zone_id: Some("Z123".to_string()),
        ..config()
    }
}

fn rendered(template: &Template) -> Value {
    serde_json::from_str(&template.to_json_pretty().unwrap()).unwrap()
}

fn properties<'a>(json: &'a Value, logical_id: &str) -> &'a Value {
    &json["Resources"][logical_id]["Properties"]
}

#[test]
fn test_bucket_created() {
    let json = rendered(&synth(&config()).unwrap().template);
    let bucket = properties(&json, ids::BUCKET);

    assert_eq!(bucket["BucketName"], json!("acme-website-123456789012-us-east-1"));
    assert_eq!(bucket["VersioningConfiguration"], json!({ "Status": "Enabled" }));
    assert_eq!(
        bucket["BucketEncryption"],
        json!({
            "ServerSideEncryptionConfiguration": [{
                "ServerSideEncryptionByDefault": { "SSEAlgorithm": "AES256" }
            }]
        })
    );
    assert_eq!(
        bucket["PublicAccessBlockConfiguration"]["RestrictPublicBuckets"],
        json!(true)
    );
    assert_eq!(json["Resources"][ids::BUCKET]["DeletionPolicy"], json!("Delete"));
}

#[test]
fn test_distribution_created() {
    let json = rendered(&synth(&config()).unwrap().template);
    let dist = &properties(&json, ids::DISTRIBUTION)["DistributionConfig"];

    assert_eq!(dist["Enabled"], json!(true));
    assert_eq!(dist["DefaultRootObject"], json!("index.html"));
    assert_eq!(dist["PriceClass"], json!("PriceClass_100"));
    assert_eq!(dist["Comment"], json!("acme Frontend Distribution"));
    assert_eq!(
        dist["DefaultCacheBehavior"]["ViewerProtocolPolicy"],
        json!("redirect-to-https")
    );
    assert_eq!(dist["CacheBehaviors"][0]["PathPattern"], json!("/api/*"));

    // Both origins read the bucket through the access control
    let origins = dist["Origins"].as_array().unwrap();
    assert_eq!(origins.len(), 2);
    for origin in origins {
        assert_eq!(
            origin["OriginAccessControlId"],
            json!({ "Fn::GetAtt": ["OAC", "Id"] })
        );
    }
}

#[test]
fn test_access_control_created() {
    let json = rendered(&synth(&config()).unwrap().template);
    assert_eq!(
        properties(&json, ids::ACCESS_CONTROL)["OriginAccessControlConfig"],
        json!({
            "Name": "acme-oac",
            "Description": "OAC for acme website bucket",
            "OriginAccessControlOriginType": "s3",
            "SigningBehavior": "always",
            "SigningProtocol": "sigv4"
        })
    );
}

#[test]
fn test_error_responses_fall_back_to_index() {
    let json = rendered(&synth(&config()).unwrap().template);
    let dist = &properties(&json, ids::DISTRIBUTION)["DistributionConfig"];

    assert_eq!(
        dist["CustomErrorResponses"],
        json!([
            {
                "ErrorCode": 403,
                "ResponseCode": 200,
                "ResponsePagePath": "/index.html",
                "ErrorCachingMinTTL": 1800
            },
            {
                "ErrorCode": 404,
                "ResponseCode": 200,
                "ResponsePagePath": "/index.html",
                "ErrorCachingMinTTL": 1800
            }
        ])
    );
}

#[test]
fn test_outputs_created() {
    let template = synth(&config()).unwrap().template;
    for name in [
        "BucketName",
        "DistributionId",
        "DistributionDomainName",
        "CloudFrontURL",
    ] {
        assert!(template.outputs.contains_key(name), "missing output {}", name);
    }
    assert!(!template.outputs.contains_key("CustomDomainURL"));
}

#[test]
fn test_expected_resource_counts() {
    let template = synth(&config()).unwrap().template;
    assert_eq!(template.count_by_kind(&ResourceKind::StorageBucket), 1);
    assert_eq!(template.count_by_kind(&ResourceKind::CdnDistribution), 1);
    assert_eq!(template.count_by_kind(&ResourceKind::AccessControlConfig), 1);
    assert_eq!(template.count_by_kind(&ResourceKind::BucketPolicy), 1);
    assert_eq!(template.count_by_kind(&ResourceKind::Certificate), 0);
    assert_eq!(template.count_by_kind(&ResourceKind::DnsRecord), 0);
}

#[test]
fn test_bucket_policy_grants_distribution() {
    let json = rendered(&synth(&config()).unwrap().template);
    let statement = &properties(&json, ids::BUCKET_POLICY)["PolicyDocument"]["Statement"][0];

    assert_eq!(statement["Sid"], json!("AllowCloudFrontServicePrincipal"));
    assert_eq!(statement["Principal"], json!({ "Service": "cloudfront.amazonaws.com" }));
    assert_eq!(statement["Action"], json!("s3:GetObject"));
    assert_eq!(
        statement["Condition"]["StringEquals"]["AWS:SourceArn"],
        json!({
            "Fn::Join": ["", [
                "arn:aws:cloudfront::",
                "123456789012",
                ":distribution/",
                { "Ref": "Distribution" }
            ]]
        })
    );
}

#[test]
fn test_synthesized_names_are_already_prefixed() {
    // The prefix pass finds nothing left to rename
    let raw = FrontendStack::new(&config()).unwrap().synthesize().unwrap();
    let prefixed = synth(&config()).unwrap().template;

    for id in [ids::BUCKET, ids::ACCESS_CONTROL] {
        assert_eq!(
            raw.resource(id).unwrap().properties,
            prefixed.resource(id).unwrap().properties
        );
    }
}

#[test]
fn test_tag_only_resources_are_tagged() {
    let template = synth(&config()).unwrap().template;
    let dist = template.resource(ids::DISTRIBUTION).unwrap();
    assert!(dist.tags.contains("Prefix", "acme"));
    assert!(dist.tags.contains("Application", "acme-frontend"));

    let bucket = template.resource(ids::BUCKET).unwrap();
    assert!(bucket.tags.is_empty());
}

#[test]
fn test_unknown_account_uses_pseudo_parameter() {
    let config = StackConfig {
        account: None,
        ..config()
    };
    let template = synth(&config).unwrap().template;
    let name = template
        .resource(ids::BUCKET)
        .and_then(|n| n.properties.naming_field())
        .cloned();

    assert_eq!(
        name,
        Some(Expr::concat(vec![
            Expr::literal("acme-website-"),
            Expr::reference("AWS::AccountId"),
            Expr::literal("-us-east-1"),
        ]))
    );
}

#[test]
fn test_domain_issues_certificate_and_records() {
    let synthesized = synth(&with_domain()).unwrap();
    let template = &synthesized.template;
    let json = rendered(template);

    let cert = properties(&json, ids::CERTIFICATE);
    assert_eq!(cert["DomainName"], json!("example.com"));
    assert_eq!(cert["SubjectAlternativeNames"], json!(["www.example.com"]));
    assert_eq!(cert["ValidationMethod"], json!("DNS"));

    let dist = &properties(&json, ids::DISTRIBUTION)["DistributionConfig"];
    assert_eq!(dist["Aliases"], json!(["example.com", "www.example.com"]));
    assert_eq!(
        dist["ViewerCertificate"]["AcmCertificateArn"],
        json!({ "Ref": "Certificate" })
    );

    assert_eq!(properties(&json, ids::APEX_RECORD)["Name"], json!("example.com."));
    assert_eq!(properties(&json, ids::WWW_RECORD)["Name"], json!("www.example.com."));
    assert_eq!(
        properties(&json, ids::WWW_RECORD)["AliasTarget"]["HostedZoneId"],
        json!("Z2FDTNDATAQYW2")
    );
    // Records take no tags on the wire
    assert!(properties(&json, ids::APEX_RECORD).get("Tags").is_none());

    assert_eq!(
        template.outputs["CustomDomainURL"].value,
        Expr::literal("https://example.com")
    );
}

#[test]
fn test_imported_certificate() {
    let config = StackConfig {
        certificate_arn: Some("arn:aws:acm:us-east-1:123456789012:certificate/abc".to_string()),
        ..with_domain()
    };
    let stack = FrontendStack::new(&config).unwrap();
    assert!(matches!(stack.certificate(), Some(CertificateSource::Imported(_))));

    let template = stack.synthesize().unwrap();
    assert!(template.resource(ids::CERTIFICATE).is_none());

    let json = rendered(&template);
    assert_eq!(
        properties(&json, ids::DISTRIBUTION)["DistributionConfig"]["ViewerCertificate"]
            ["AcmCertificateArn"],
        json!("arn:aws:acm:us-east-1:123456789012:certificate/abc")
    );
}

#[test]
fn test_certificate_without_domain_has_no_aliases() {
    let config = StackConfig {
        certificate_arn: Some("arn:aws:acm:us-east-1:123456789012:certificate/abc".to_string()),
        ..config()
    };
    let json = rendered(&synth(&config).unwrap().template);
    let dist = &properties(&json, ids::DISTRIBUTION)["DistributionConfig"];
    assert!(dist.get("Aliases").is_none());
    assert!(dist.get("ViewerCertificate").is_none());
}

#[test]
fn test_domain_without_zone_has_no_records() {
    let config = StackConfig {
        domain: Some("example.com".to_string()),
        ..config()
    };
    let template = synth(&config).unwrap().template;
    assert_eq!(template.count_by_kind(&ResourceKind::DnsRecord), 0);
    assert_eq!(template.count_by_kind(&ResourceKind::Certificate), 1);
}

#[test]
fn test_stack_tags_are_applied() {
    let mut config = config();
    config.tags.insert("Team".to_string(), "web".to_string());

    let template = synth(&config).unwrap().template;
    for id in [ids::BUCKET, ids::DISTRIBUTION, ids::ACCESS_CONTROL] {
        assert!(template.resource(id).unwrap().tags.contains("Team", "web"), "{}", id);
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = StackConfig {
        prefix: String::new(),
        ..config()
    };
    assert!(matches!(synth(&config), Err(BuildError::Config(_))));
}

#[test]
fn test_stack_name() {
    assert_eq!(synth(&config()).unwrap().stack_name, "acme-FrontendInfraStack");
}
