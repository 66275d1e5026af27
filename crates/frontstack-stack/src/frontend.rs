//! Static website delivery stack
//!
//! A private, versioned bucket served through a CDN distribution that
//! reads it via an origin access control. With a domain the distribution
//! gets aliases and a certificate; with a hosted zone as well, alias
//! records point the domain at it.

use crate::error::Result;
use frontstack_config::StackConfig;
use frontstack_core::model::{
    ACCOUNT_ID, AliasTarget, BucketEncryption, BucketPolicyProperties, BucketProperties,
    CACHING_DISABLED, CACHING_OPTIMIZED, CLOUDFRONT_HOSTED_ZONE_ID, CacheBehavior,
    CertificateProperties, CustomErrorResponse, CustomOriginConfig, DistributionConfig,
    DistributionProperties, Effect, OneOrMany, Origin, OriginAccessControlConfig,
    OriginAccessControlProperties, PolicyDocument, PolicyStatement, PublicAccessBlockConfiguration,
    RecordSetProperties, VersioningConfiguration, ViewerCertificate,
};
use frontstack_core::{Expr, Output, Prefix, RemovalPolicy, ResourceNode, Template};
use serde_json::{Map, json};
use tracing::{debug, info, instrument};

pub const DESCRIPTION: &str =
    "Frontend infrastructure stack with S3, CloudFront, and optional Route53/ACM";

/// Logical ids of the declared resources
pub mod ids {
    pub const BUCKET: &str = "WebsiteBucket";
    pub const BUCKET_POLICY: &str = "WebsiteBucketPolicy";
    pub const ACCESS_CONTROL: &str = "OAC";
    pub const CERTIFICATE: &str = "Certificate";
    pub const DISTRIBUTION: &str = "Distribution";
    pub const APEX_RECORD: &str = "ARecord";
    pub const WWW_RECORD: &str = "WWWARecord";
}

const SITE_ORIGIN: &str = "WebsiteOrigin";
const API_ORIGIN: &str = "ApiOrigin";
const API_PATH: &str = "/api/*";
const INDEX_DOCUMENT: &str = "index.html";

/// Error responses are cached for 30 minutes
const ERROR_CACHING_TTL: u64 = 30 * 60;

/// Where the distribution's TLS certificate comes from
#[derive(Debug, Clone, PartialEq)]
pub enum CertificateSource {
    /// Existing certificate, referenced by ARN
    Imported(String),
    /// Issued for the domain (and `www.`) with DNS validation
    Issued { domain: String },
}

/// Builder for the frontend stack
#[derive(Debug, Clone)]
pub struct FrontendStack {
    prefix: Prefix,
    account: Option<String>,
    region: String,
    domain: Option<String>,
    hosted_zone_id: Option<String>,
    certificate: Option<CertificateSource>,
}

impl FrontendStack {
    pub fn new(config: &StackConfig) -> Result<Self> {
        config.validate()?;

        let certificate = match (&config.certificate_arn, &config.domain) {
            (Some(arn), _) => Some(CertificateSource::Imported(arn.clone())),
            (None, Some(domain)) => Some(CertificateSource::Issued {
                domain: domain.clone(),
            }),
            (None, None) => None,
        };

        Ok(Self {
            prefix: config.prefix()?,
            account: config.account.clone(),
            region: config.region.clone(),
            domain: config.domain.clone(),
            hosted_zone_id: config.hosted_zone_id.clone(),
            certificate,
        })
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub fn certificate(&self) -> Option<&CertificateSource> {
        self.certificate.as_ref()
    }

    /// Declare every resource and output
    #[instrument(skip(self), fields(prefix = %self.prefix))]
    pub fn synthesize(&self) -> Result<Template> {
        let mut template = Template::new(DESCRIPTION);

        template.add_resource(ids::BUCKET, self.bucket())?;
        template.add_resource(ids::ACCESS_CONTROL, self.access_control())?;

        let certificate_arn = match &self.certificate {
            Some(CertificateSource::Imported(arn)) => Some(Expr::literal(arn.as_str())),
            Some(CertificateSource::Issued { domain }) => {
                template.add_resource(ids::CERTIFICATE, self.issued_certificate(domain))?;
                Some(Expr::reference(ids::CERTIFICATE))
            }
            None => None,
        };

        template.add_resource(ids::DISTRIBUTION, self.distribution(certificate_arn))?;
        template.add_resource(ids::BUCKET_POLICY, self.bucket_policy())?;

        if let (Some(domain), Some(zone)) = (&self.domain, &self.hosted_zone_id) {
            template.add_resource(ids::APEX_RECORD, alias_record(zone, domain))?;
            template.add_resource(ids::WWW_RECORD, alias_record(zone, &www(domain)))?;
        } else if self.hosted_zone_id.is_some() {
            debug!("hosted zone given without a domain; no records declared");
        }

        self.outputs(&mut template)?;

        info!(
            resources = template.resources.len(),
            outputs = template.outputs.len(),
            "frontend stack synthesized"
        );
        Ok(template)
    }

    /// `{prefix}-website-{account}-{region}`; the account falls back to the
    /// deploy-time pseudo parameter when unknown
    fn bucket_name(&self) -> Expr {
        let head = format!("{}-website-", self.prefix);
        match &self.account {
            Some(account) => Expr::literal(format!("{}{}-{}", head, account, self.region)),
            None => Expr::concat(vec![
                Expr::literal(head),
                Expr::reference(ACCOUNT_ID),
                Expr::literal(format!("-{}", self.region)),
            ]),
        }
    }

    fn account_expr(&self) -> Expr {
        match &self.account {
            Some(account) => Expr::literal(account.as_str()),
            None => Expr::reference(ACCOUNT_ID),
        }
    }

    fn bucket(&self) -> ResourceNode {
        ResourceNode::new(BucketProperties {
            bucket_name: Some(self.bucket_name()),
            versioning_configuration: Some(VersioningConfiguration::enabled()),
            bucket_encryption: Some(BucketEncryption::s3_managed()),
            public_access_block_configuration: Some(PublicAccessBlockConfiguration::block_all()),
            extra: Map::new(),
        })
        .with_removal_policy(RemovalPolicy::Delete)
    }

    fn access_control(&self) -> ResourceNode {
        ResourceNode::new(OriginAccessControlProperties {
            origin_access_control_config: OriginAccessControlConfig {
                name: Some(Expr::literal(format!("{}-oac", self.prefix))),
                description: Some(format!("OAC for {} website bucket", self.prefix)),
                origin_access_control_origin_type: Some("s3".to_string()),
                signing_behavior: Some("always".to_string()),
                signing_protocol: Some("sigv4".to_string()),
                extra: Map::new(),
            },
            extra: Map::new(),
        })
    }

    fn issued_certificate(&self, domain: &str) -> ResourceNode {
        ResourceNode::new(CertificateProperties {
            domain_name: Some(Expr::literal(domain)),
            subject_alternative_names: vec![www(domain)],
            validation_method: Some("DNS".to_string()),
            extra: Map::new(),
        })
    }

    fn distribution(&self, certificate_arn: Option<Expr>) -> ResourceNode {
        let origin = |id: &str| Origin {
            id: id.to_string(),
            domain_name: Expr::get_att(ids::BUCKET, "RegionalDomainName"),
            origin_access_control_id: Some(Expr::get_att(ids::ACCESS_CONTROL, "Id")),
            custom_origin_config: Some(CustomOriginConfig::https_only()),
            extra: Map::new(),
        };

        let error_response = |code: u16| CustomErrorResponse {
            error_code: code,
            response_code: Some(200),
            response_page_path: Some(format!("/{}", INDEX_DOCUMENT)),
            error_caching_min_ttl: Some(ERROR_CACHING_TTL),
            extra: Map::new(),
        };

        // Aliases need both a certificate and a domain
        let (aliases, viewer_certificate) = match (certificate_arn, &self.domain) {
            (Some(arn), Some(domain)) => (
                vec![domain.clone(), www(domain)],
                Some(ViewerCertificate {
                    acm_certificate_arn: Some(arn),
                    ssl_support_method: Some("sni-only".to_string()),
                    minimum_protocol_version: Some("TLSv1.2_2021".to_string()),
                    cloud_front_default_certificate: None,
                    extra: Map::new(),
                }),
            ),
            _ => (Vec::new(), None),
        };

        ResourceNode::new(DistributionProperties {
            distribution_config: DistributionConfig {
                comment: Some(format!("{} Frontend Distribution", self.prefix)),
                default_root_object: Some(INDEX_DOCUMENT.to_string()),
                enabled: Some(true),
                http_version: Some("http2".to_string()),
                ipv6_enabled: Some(true),
                price_class: Some("PriceClass_100".to_string()),
                aliases,
                origins: vec![origin(SITE_ORIGIN), origin(API_ORIGIN)],
                default_cache_behavior: Some(CacheBehavior {
                    path_pattern: None,
                    target_origin_id: SITE_ORIGIN.to_string(),
                    viewer_protocol_policy: "redirect-to-https".to_string(),
                    allowed_methods: methods(&["GET", "HEAD", "OPTIONS"]),
                    cached_methods: methods(&["GET", "HEAD"]),
                    cache_policy_id: Some(CACHING_OPTIMIZED.to_string()),
                    compress: Some(true),
                    extra: Map::new(),
                }),
                cache_behaviors: vec![CacheBehavior {
                    path_pattern: Some(API_PATH.to_string()),
                    target_origin_id: API_ORIGIN.to_string(),
                    viewer_protocol_policy: "redirect-to-https".to_string(),
                    allowed_methods: methods(&[
                        "GET", "HEAD", "OPTIONS", "PUT", "PATCH", "POST", "DELETE",
                    ]),
                    cached_methods: methods(&["GET", "HEAD"]),
                    cache_policy_id: Some(CACHING_DISABLED.to_string()),
                    compress: Some(true),
                    extra: Map::new(),
                }],
                custom_error_responses: vec![error_response(403), error_response(404)],
                viewer_certificate,
                extra: Map::new(),
            },
            extra: Map::new(),
        })
    }

    fn bucket_policy(&self) -> ResourceNode {
        let source_arn = Expr::concat(vec![
            Expr::literal("arn:aws:cloudfront::"),
            self.account_expr(),
            Expr::literal(":distribution/"),
            Expr::reference(ids::DISTRIBUTION),
        ]);

        let statement = PolicyStatement {
            sid: Some("AllowCloudFrontServicePrincipal".to_string()),
            effect: Effect::Allow,
            principal: Some(json!({ "Service": "cloudfront.amazonaws.com" })),
            action: Some(OneOrMany::One("s3:GetObject".to_string())),
            resource: Some(OneOrMany::One(Expr::concat(vec![
                Expr::get_att(ids::BUCKET, "Arn"),
                Expr::literal("/*"),
            ]))),
            condition: Some(json!({
                "StringEquals": { "AWS:SourceArn": source_arn.to_json() }
            })),
            extra: Map::new(),
        };

        ResourceNode::new(BucketPolicyProperties {
            bucket: Expr::reference(ids::BUCKET),
            policy_document: PolicyDocument::new(vec![statement]),
            extra: Map::new(),
        })
    }

    fn outputs(&self, template: &mut Template) -> Result<()> {
        let domain_name = Expr::get_att(ids::DISTRIBUTION, "DomainName");

        template.add_output(
            "BucketName",
            Output::new(Expr::reference(ids::BUCKET), "Name of the S3 bucket"),
        )?;
        template.add_output(
            "DistributionId",
            Output::new(
                Expr::reference(ids::DISTRIBUTION),
                "CloudFront Distribution ID",
            ),
        )?;
        template.add_output(
            "DistributionDomainName",
            Output::new(domain_name.clone(), "CloudFront Distribution Domain Name"),
        )?;
        template.add_output(
            "CloudFrontURL",
            Output::new(
                Expr::concat(vec![Expr::literal("https://"), domain_name]),
                "CloudFront URL",
            ),
        )?;
        if let Some(domain) = &self.domain {
            template.add_output(
                "CustomDomainURL",
                Output::new(
                    Expr::literal(format!("https://{}", domain)),
                    "Custom Domain URL",
                ),
            )?;
        }
        Ok(())
    }
}

/// Alias `A` record pointing `name` at the distribution
fn alias_record(zone: &str, name: &str) -> ResourceNode {
    ResourceNode::new(RecordSetProperties {
        hosted_zone_id: Some(Expr::literal(zone)),
        name: Some(Expr::literal(format!("{}.", name))),
        record_type: Some("A".to_string()),
        alias_target: Some(AliasTarget {
            dns_name: Expr::get_att(ids::DISTRIBUTION, "DomainName"),
            hosted_zone_id: Expr::literal(CLOUDFRONT_HOSTED_ZONE_ID),
            evaluate_target_health: None,
            extra: Map::new(),
        }),
        extra: Map::new(),
    })
}

fn www(domain: &str) -> String {
    format!("www.{}", domain)
}

fn methods(names: &[&str]) -> Vec<String> {
    names.iter().map(|m| m.to_string()).collect()
}

