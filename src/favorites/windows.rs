//! Windows (Intune settings catalog) configuration-policy document.
//!
//! The favorites array travels as a JSON *string* inside a fixed policy
//! envelope, at
//! `settings[0].settingInstance.choiceSettingValue.children[0].simpleSettingValue.value`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::model::{load_tree, ExportModel};
use super::store::FavoritesTree;
use crate::error::{AppError, Result};

/// Default policy display name.
pub const DEFAULT_POLICY_NAME: &str = "Edge_ManagedFavorites";

const ODATA_CONTEXT: &str =
    "https://graph.microsoft.com/beta/$metadata#deviceManagement/configurationPolicies/$entity";
const CHOICE_INSTANCE_TYPE: &str =
    "#microsoft.graph.deviceManagementConfigurationChoiceSettingInstance";
const SIMPLE_INSTANCE_TYPE: &str =
    "#microsoft.graph.deviceManagementConfigurationSimpleSettingInstance";
const STRING_VALUE_TYPE: &str = "#microsoft.graph.deviceManagementConfigurationStringSettingValue";
const SETTING_DEFINITION: &str =
    "device_vendor_msft_policy_config_microsoft_edge~policy~microsoft_edge_managedfavorites";
const CHOICE_ENABLED: &str =
    "device_vendor_msft_policy_config_microsoft_edge~policy~microsoft_edge_managedfavorites_1";
const FAVORITES_DEFINITION: &str = "device_vendor_msft_policy_config_microsoft_edge~policy~microsoft_edge_managedfavorites_managedfavorites";

/// JSON pointer to the embedded favorites string.
const PAYLOAD_POINTER: &str =
    "/settings/0/settingInstance/choiceSettingValue/children/0/simpleSettingValue/value";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PolicyDocument {
    #[serde(rename = "@odata.context")]
    odata_context: String,
    created_date_time: String,
    creation_source: Option<String>,
    description: String,
    last_modified_date_time: String,
    name: String,
    platforms: String,
    priority_meta_data: Option<String>,
    role_scope_tag_ids: Vec<String>,
    setting_count: u32,
    technologies: String,
    id: String,
    template_reference: TemplateReference,
    settings: Vec<PolicySetting>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateReference {
    template_id: String,
    template_family: String,
    template_display_name: Option<String>,
    template_display_version: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PolicySetting {
    id: String,
    setting_instance: ChoiceSettingInstance,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChoiceSettingInstance {
    #[serde(rename = "@odata.type")]
    odata_type: String,
    setting_definition_id: String,
    setting_instance_template_reference: Option<String>,
    audit_rule_information: Option<String>,
    choice_setting_value: ChoiceSettingValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChoiceSettingValue {
    setting_value_template_reference: Option<String>,
    value: String,
    children: Vec<SimpleSettingInstance>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimpleSettingInstance {
    #[serde(rename = "@odata.type")]
    odata_type: String,
    setting_definition_id: String,
    setting_instance_template_reference: Option<String>,
    audit_rule_information: Option<String>,
    simple_setting_value: StringSettingValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StringSettingValue {
    #[serde(rename = "@odata.type")]
    odata_type: String,
    setting_value_template_reference: Option<String>,
    value: String,
}

impl PolicyDocument {
    fn new(policy_name: &str, id: Uuid, now: DateTime<Utc>, payload: String) -> Self {
        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        Self {
            odata_context: ODATA_CONTEXT.to_string(),
            created_date_time: timestamp.clone(),
            creation_source: None,
            description: String::new(),
            last_modified_date_time: timestamp,
            name: policy_name.to_string(),
            platforms: "windows10".to_string(),
            priority_meta_data: None,
            role_scope_tag_ids: vec!["0".to_string()],
            setting_count: 1,
            technologies: "mdm".to_string(),
            id: id.to_string(),
            template_reference: TemplateReference {
                template_id: String::new(),
                template_family: "none".to_string(),
                template_display_name: None,
                template_display_version: None,
            },
            settings: vec![PolicySetting {
                id: "0".to_string(),
                setting_instance: ChoiceSettingInstance {
                    odata_type: CHOICE_INSTANCE_TYPE.to_string(),
                    setting_definition_id: SETTING_DEFINITION.to_string(),
                    setting_instance_template_reference: None,
                    audit_rule_information: None,
                    choice_setting_value: ChoiceSettingValue {
                        setting_value_template_reference: None,
                        value: CHOICE_ENABLED.to_string(),
                        children: vec![SimpleSettingInstance {
                            odata_type: SIMPLE_INSTANCE_TYPE.to_string(),
                            setting_definition_id: FAVORITES_DEFINITION.to_string(),
                            setting_instance_template_reference: None,
                            audit_rule_information: None,
                            simple_setting_value: StringSettingValue {
                                odata_type: STRING_VALUE_TYPE.to_string(),
                                setting_value_template_reference: None,
                                value: payload,
                            },
                        }],
                    },
                },
            }],
        }
    }
}

/// Render the policy document with a fresh id and the current time.
pub fn export_document(model: &ExportModel, policy_name: &str) -> Result<String> {
    export_document_with(model, policy_name, Uuid::new_v4(), Utc::now())
}

/// Render the policy document with a caller-chosen id and timestamp.
pub fn export_document_with(
    model: &ExportModel,
    policy_name: &str,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<String> {
    let document = PolicyDocument::new(policy_name, id, now, model.to_json()?);
    serde_json::to_string_pretty(&document)
        .map_err(|e| AppError::Format(format!("cannot serialize policy document: {}", e)))
}

/// Read a policy document and rebuild the tree from its embedded favorites.
///
/// Everything outside the favorites string is ignored.
pub fn import_document(text: &str) -> Result<FavoritesTree> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| AppError::Format(format!("not a JSON policy document: {}", e)))?;

    let payload = document
        .pointer(PAYLOAD_POINTER)
        .and_then(Value::as_str)
        .filter(|payload| !payload.is_empty())
        .ok_or_else(|| {
            AppError::Format(
                "missing settings[0].settingInstance.choiceSettingValue.children[0].simpleSettingValue.value"
                    .into(),
            )
        })?;

    let favorites: Value = serde_json::from_str(payload)
        .map_err(|e| AppError::Format(format!("favorites payload is not valid JSON: {}", e)))?;
    load_tree(&favorites)
}
