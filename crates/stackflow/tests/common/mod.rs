use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

/// Stub `aws` executable driven by files under $STACKFLOW_TEST_DIR
///
/// Every invocation is appended to aws.log; stack state lives in stacks/
/// (one describe-stacks response per file). Arguments are positional
/// because the CLI always calls `aws --region R --output json SERVICE VERB ...`.
const STUB_AWS: &str = r#"#!/usr/bin/env bash
set -u
dir="${STACKFLOW_TEST_DIR:?}"
echo "$*" >> "$dir/aws.log"
service="${5:-}"; verb="${6:-}"

case "$service $verb" in
  "sts get-caller-identity")
    echo '{"Account":"123456789012","Arn":"arn:aws:iam::123456789012:user/tester","UserId":"AIDATEST"}'
    ;;
  "cloudformation validate-template")
    echo '{"Parameters":[]}'
    ;;
  "cloudformation describe-stacks")
    name="$8"
    if [ -f "$dir/stacks/$name" ]; then
      cat "$dir/stacks/$name"
    else
      echo "An error occurred (ValidationError): Stack with id $name does not exist" >&2
      exit 254
    fi
    ;;
  "cloudformation create-stack")
    name="$8"
    outputs="$(cat "$dir/outputs-$name.json" 2>/dev/null || echo '[]')"
    printf '{"Stacks":[{"StackName":"%s","StackStatus":"CREATE_COMPLETE","Outputs":%s}]}' \
      "$name" "$outputs" > "$dir/stacks/$name"
    echo '{"StackId":"arn:aws:cloudformation:us-east-1:123456789012:stack/'"$name"'/test"}'
    ;;
  "cloudformation update-stack")
    echo "An error occurred (ValidationError): No updates are to be performed." >&2
    exit 254
    ;;
  "cloudformation delete-stack")
    name="$8"
    rm -f "$dir/stacks/$name"
    echo '{}'
    ;;
  "s3api list-object-versions")
    cat "$dir/bucket-listing.json" 2>/dev/null || echo '{}'
    ;;
  "s3api delete-objects")
    echo '{}' > "$dir/bucket-listing.json"
    echo '{}'
    ;;
  "wafv2 list-resources-for-web-acl")
    cat "$dir/waf-associations.json" 2>/dev/null || echo '{"ResourceArns":[]}'
    ;;
  "wafv2 disassociate-web-acl")
    echo '{}'
    ;;
  "logs describe-log-groups")
    echo '{"logGroups":[]}'
    ;;
  "logs delete-log-group")
    echo '{}'
    ;;
  *)
    echo "stub aws: unhandled command: $*" >&2
    exit 1
    ;;
esac
"#;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let p = root.path();

        fs::create_dir_all(p.join("bin")).unwrap();
        fs::create_dir_all(p.join("aws-state/stacks")).unwrap();
        fs::create_dir_all(p.join("cloudformation")).unwrap();
        fs::create_dir_all(p.join("parameters")).unwrap();

        let stub = p.join("bin/aws");
        fs::write(&stub, STUB_AWS).unwrap();
        let mut perms = fs::metadata(&stub).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&stub, perms).unwrap();

        fs::write(
            p.join("cloudformation/three-tier-architecture.yaml"),
            "AWSTemplateFormatVersion: '2010-09-09'\n",
        )
        .unwrap();
        fs::write(
            p.join("cloudformation/waf-protection.yaml"),
            "AWSTemplateFormatVersion: '2010-09-09'\n",
        )
        .unwrap();
        fs::write(
            p.join("parameters/dev-parameters.json"),
            r#"[{"ParameterKey": "EnvironmentName", "ParameterValue": "dev"}]"#,
        )
        .unwrap();
        fs::write(
            p.join("parameters/waf-dev-parameters.json"),
            r#"[{"ParameterKey": "RateLimit", "ParameterValue": "2000"}]"#,
        )
        .unwrap();

        Self { root }
    }

    /// Command with the stub aws first on PATH and cwd in the project
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("stackflow").unwrap();
        cmd.current_dir(self.root.path());
        cmd.env(
            "PATH",
            format!(
                "{}:{}",
                self.root.path().join("bin").display(),
                std::env::var("PATH").unwrap_or_default()
            ),
        );
        cmd.env("STACKFLOW_TEST_DIR", self.root.path().join("aws-state"));
        cmd.env_remove("AWS_REGION");
        cmd
    }

    /// Pre-seed an existing stack with a describe-stacks response
    #[allow(dead_code)]
    pub fn seed_stack(&self, name: &str, status: &str, outputs_json: &str) {
        let body = format!(
            r#"{{"Stacks":[{{"StackName":"{}","StackStatus":"{}","Outputs":{}}}]}}"#,
            name, status, outputs_json
        );
        fs::write(self.root.path().join("aws-state/stacks").join(name), body).unwrap();
    }

    /// Outputs the stub reports after a create-stack of this name
    #[allow(dead_code)]
    pub fn seed_outputs_on_create(&self, name: &str, outputs_json: &str) {
        fs::write(
            self.root
                .path()
                .join("aws-state")
                .join(format!("outputs-{}.json", name)),
            outputs_json,
        )
        .unwrap();
    }

    #[allow(dead_code)]
    pub fn seed_bucket_listing(&self, json: &str) {
        fs::write(self.root.path().join("aws-state/bucket-listing.json"), json).unwrap();
    }

    /// Everything the stub aws was asked to do, in order
    #[allow(dead_code)]
    pub fn aws_log(&self) -> String {
        fs::read_to_string(self.root.path().join("aws-state/aws.log")).unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn remove_file(&self, rel: &str) {
        fs::remove_file(self.root.path().join(rel)).unwrap();
    }
}
