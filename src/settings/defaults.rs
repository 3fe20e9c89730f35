use serde_json::{Value, json};

use crate::document::JsonObject;

pub const SIDEBAR_LOCATION_KEY: &str = "workbench.sideBar.location";
pub const CODE_ANALYZERS_KEY: &str = "al.codeAnalyzers";
pub const OBJECT_NAME_PREFIX_KEY: &str = "CRS.ObjectNamePrefix";
pub const APP_SOURCE_COP_TOKEN: &str = "${AppSourceCop}";

/// The settings written by the scaffold command for a project using `prefix`
pub fn default_settings(prefix: &str) -> JsonObject {
    let settings = json!({
        "search.exclude": {
            "**/.alcache": true,
            "**/rad.json": true,
            "**/*.code-search": true
        },
        "files.trimTrailingWhitespace": false,
        "files.autoSave": "afterDelay",
        "files.autoSaveDelay": 10000,
        "window.autoDetectColorScheme": false,
        "workbench.sideBar.location": "right",
        "workbench.statusBar.visible": true,
        "workbench.editor.showTabs": "multiple",
        "workbench.editor.tabSizing": "shrink",
        "workbench.editor.tabActionLocation": "right",
        "workbench.editor.wrapTabs": true,
        "workbench.startupEditor": "newUntitledFile",
        "workbench.editor.enablePreview": true,
        "workbench.settings.editor": "json",
        "breadcrumbs.enabled": true,
        "explorer.compactFolders": false,
        "explorer.autoReveal": true,
        "editor.formatOnSave": true,
        "editor.suggestSelection": "first",
        "editor.snippetSuggestions": "bottom",
        "editor.suggest.snippetsPreventQuickSuggestions": false,
        "editor.tabCompletion": "on",
        "editor.wordWrap": "on",
        "editor.mouseWheelZoom": true,
        "editor.minimap.enabled": false,
        "editor.cursorBlinking": "phase",
        "editor.cursorStyle": "line",
        "editor.lineHeight": 22,
        "editor.inlayHints.enabled": "offUnlessPressed",
        "extensions.ignoreRecommendations": true,
        "git.autofetch": true,
        "git.enableSmartCommit": false,
        "git.suggestSmartCommit": false,
        "git.postCommitCommand": "push",
        "git.enableStatusBarSync": false,
        "git.pruneOnFetch": true,
        "al.browser": "Edge",
        "al.enableCodeActions": true,
        "al.enableCodeAnalysis": true,
        "al.incrementalBuild": true,
        "al.backgroundCodeAnalysis": "Project",
        "al.packageCachePath": ".alpackages",
        "al.compilationOptions": {
            "generateReportLayout": true
        },
        "al.assemblyProbingPaths": [
            ".netpackages"
        ],
        "al.codeAnalyzers": [
            APP_SOURCE_COP_TOKEN,
            "${CodeCop}",
            "${UICop}"
        ],
        "al.inlayhints.functionReturnTypes.enabled": true,
        "al.inlayhints.parameterNames.enabled": true,
        "al-test-runner.sendDebugTelemetry": false,
        "CRS.FileNamePattern": "<ObjectNameShort>.<ObjectTypeShortPascalCase>.al",
        "CRS.FileNamePatternExtensions": "<ObjectNameShort>.<ObjectTypeShortPascalCase>.al",
        "CRS.FileNamePatternPageCustomizations": "<ObjectNameShort>.<ObjectTypeShortPascalCase>.al",
        "CRS.ObjectNamePrefix": format!("{} ", prefix),
        "CRS.RenameWithGit": false,
        "CRS.DependencyGraph.ExcludePublishers": [
            "Microsoft"
        ],
        "[al]": {
            "editor.wordBasedSuggestions": "off",
            "editor.suggestSelection": "first",
            "editor.formatOnSave": true,
            "editor.semanticHighlighting.enabled": false
        },
        "notebook.breadcrumbs.showCodeCells": true
    });

    match settings {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}
